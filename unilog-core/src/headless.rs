// unilog-core/src/headless.rs
// File: unilog-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running the pipeline without any I/O plumbing.
//! Provides a helper for a full, one-shot transformation of a string.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::ParserConfig;
use crate::pipeline::Pipeline;

/// Compiles `config`, runs one fresh pipeline over every line of `content`
/// and returns the emitted text, each emitted line followed by `\n`.
///
/// Lines are split on `\n`; a trailing `\r` is dropped from each line.
pub fn headless_process_str(config: &ParserConfig, content: &str) -> Result<String> {
    let compiled = config.compile().context("Failed to compile parser configuration")?;
    let mut pipeline = Pipeline::new(Arc::new(compiled));

    let mut output = String::with_capacity(content.len());
    for line in content.lines() {
        if let Some(emitted) = pipeline.process_line(line) {
            output.push_str(&emitted);
            output.push('\n');
        }
    }
    Ok(output)
}
