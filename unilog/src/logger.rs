//! Logger setup for the `unilog` binary.
//!
//! All diagnostics go to stderr; stdout carries log content only.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`. `RUST_LOG` is honoured unless `level` overrides it;
/// without either, only warnings and errors are shown.
///
/// Safe to call more than once: later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr);
    let _ = builder.try_init();
}
