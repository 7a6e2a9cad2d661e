//! # unilog Core Library
//!
//! `unilog-core` provides the platform-independent logic for trimming build and
//! runtime logs. It defines the configuration model, compiles it into immutable
//! descriptors, and runs a stateful, strictly sequential line pipeline that
//! strips noise, drops whole blocks and collapses repetitive sections into
//! compact summaries.
//!
//! The library performs no I/O of its own beyond loading configuration files;
//! reading the log and routing the output is left to the caller.
//!
//! ## Modules
//!
//! * `config`: Defines `ParserConfig`, the YAML/JSON configuration document.
//! * `compiler`: Compiles a `ParserConfig` into a shareable `CompiledConfig`.
//! * `preprocess`: Stateless substring removal applied before every other stage.
//! * `matchers`: Stateful block matchers (tabulated and start/end blocks).
//! * `summarizers`: Stateful summarizers (scene timing and run counting).
//! * `pipeline`: Drives one line at a time through every stage.
//! * `headless`: One-shot convenience wrapper over a whole string.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use unilog_core::{ParserConfig, Pipeline};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the built-in configuration and compile it once.
//!     let compiled = Arc::new(ParserConfig::load_default()?.compile()?);
//!
//!     // 2. Create one pipeline per input stream.
//!     let mut pipeline = Pipeline::new(Arc::clone(&compiled));
//!
//!     // 3. Feed lines in order; `None` means the line was dropped.
//!     for line in ["[Performance] tick", "Build succeeded"] {
//!         if let Some(out) = pipeline.process_line(line) {
//!             println!("{}", out);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Loading uses `anyhow::Error` with file context. Compilation returns
//! [`UnilogError`], reporting every invalid pattern at once. Per-line processing
//! is infallible.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod compiler;
pub mod config;
pub mod errors;
pub mod headless;
pub mod matchers;
pub mod pipeline;
pub mod preprocess;
pub mod summarizers;

/// Re-exports the public configuration types.
pub use config::{
    Matchers,
    ParserConfig,
    Preprocessors,
    RunCountDescriptor,
    StartEndBlock,
    Summarizers,
    TabulatedBlock,
    DEFAULT_CONFIG_FILE_NAME,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::UnilogError;

pub use compiler::{compile_config, CompiledConfig};
pub use headless::headless_process_str;
pub use matchers::{LineMatcher, MatcherDescriptor};
pub use pipeline::{Pipeline, PipelineStats};
pub use preprocess::PreprocessorSet;
pub use summarizers::{Summarizer, SummarizerDescriptor};
