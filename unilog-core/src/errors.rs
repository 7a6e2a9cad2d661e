//! errors.rs - Custom error types for the unilog-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `unilog-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UnilogError {
    #[error("Failed to compile pattern for {0}: {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("Pattern for {0}: length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Pattern for {0} is empty")]
    EmptyPattern(String),

    #[error("Invalid message template for {0}: {1}")]
    InvalidTemplate(String, String),

    #[error("Invalid summarizer '{0}': {1}")]
    InvalidSummarizer(String, String),

    #[error("Failed to serialize configuration: {0}")]
    SerializationError(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
