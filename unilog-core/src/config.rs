//! Configuration management for `unilog-core`.
//!
//! This module defines the declarative configuration document: the preprocessor
//! pattern lists, the matcher descriptors and the summarizer switches. It handles
//! serialization/deserialization of YAML and JSON documents and provides utilities
//! for loading the embedded default configuration.
//!
//! Nothing in here is compiled or stateful. See [`crate::compiler`] for turning a
//! [`ParserConfig`] into ready-to-run descriptors.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::UnilogError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Default file name the CLI looks for when no explicit config path is given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "log_parser.yaml";

/// Represents the top-level configuration structure for unilog.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    /// Substring removal applied to every line before anything else.
    pub preprocessors: Preprocessors,
    /// Whole-line skip patterns and stateful block matchers.
    pub matchers: Matchers,
    /// Summarizer switches and custom run-count summarizers.
    pub summarizers: Summarizers,
}

/// Patterns that strip substrings out of a line.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Preprocessors {
    /// Each pattern removes its first match from the line, in list order.
    pub remove_first_matching_from_line: Vec<String>,
    /// Each pattern removes all of its matches from the line, in list order.
    pub remove_all_matching_from_line: Vec<String>,
    /// Strips terminal escape sequences before the pattern lists run.
    pub strip_ansi_escapes: bool,
}

/// Descriptors for everything that can drop a line outright.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Matchers {
    /// Any line matching one of these is dropped.
    pub remove_line: Vec<String>,
    /// Named blocks made of a start line followed by indented lines.
    pub remove_tabulated_blocks: BTreeMap<String, TabulatedBlock>,
    /// Named blocks delimited by a start and an end line.
    pub remove_start_end_blocks: BTreeMap<String, StartEndBlock>,
}

/// A start line followed by a run of indented lines.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TabulatedBlock {
    pub start: String,
    /// Whether the start line itself is dropped. Kept when omitted.
    pub match_start: bool,
}

/// A region delimited by a start and an end line. Both boundary lines are
/// kept unless their flag says otherwise.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StartEndBlock {
    pub start: String,
    pub end: String,
    /// Whether the start line itself is dropped.
    pub match_start: bool,
    /// Whether the end line itself is dropped.
    pub match_end: bool,
}

/// Summarizer switches. The built-in summarizers always run in the order
/// scene, assets, C# warnings, followed by `count_summarizers` sorted by name.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Summarizers {
    pub enable_scene_summarizer: bool,
    pub enable_assets_summarizer: bool,
    #[serde(alias = "enableCscWarningsSumarizer")]
    pub enable_csc_warnings_summarizer: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub count_summarizers: BTreeMap<String, RunCountDescriptor>,
}

/// Declarative definition of a run-counting summarizer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RunCountDescriptor {
    /// A line matching any of these extends the current run.
    pub count_patterns: Vec<String>,
    /// When set, only a line matching this closes a run; other non-counted
    /// lines inside the run are dropped. When unset, the first non-counted
    /// line closes the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_pattern: Option<String>,
    /// Emit progress only at `count <= multiplicative_from` and at multiples
    /// of `multiplicative_base`. When false, every counted line emits progress.
    pub multiplicative_print: bool,
    pub multiplicative_from: u64,
    pub multiplicative_base: u64,
    /// `tinytemplate` source rendered with a `count` field.
    pub message_template: String,
}

impl Default for RunCountDescriptor {
    fn default() -> Self {
        Self {
            count_patterns: Vec::new(),
            finish_pattern: None,
            multiplicative_print: true,
            multiplicative_from: 10,
            multiplicative_base: 100,
            message_template: "{count} matching lines".to_string(),
        }
    }
}

impl ParserConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading parser configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Loaded {} line patterns, {} block matchers from file {}.",
            config.matchers.remove_line.len(),
            config.matchers.remove_tabulated_blocks.len() + config.matchers.remove_start_end_blocks.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the configuration embedded in the binary.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config = Self::from_yaml_str(default_yaml).context("Failed to parse default configuration")?;
        debug!("Loaded {} default line patterns.", config.matchers.remove_line.len());
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to the embedded default.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using built-in defaults.", path.display());
            Self::load_default()
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // serde_yml rejects a document with no content at all.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(text).context("Invalid YAML configuration")
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid JSON configuration")
    }

    pub fn as_yaml(&self) -> Result<String, UnilogError> {
        serde_yml::to_string(self).map_err(|e| {
            UnilogError::SerializationError(format!("error converting configuration into yaml: {}", e))
        })
    }

    pub fn as_json(&self) -> Result<String, UnilogError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            UnilogError::SerializationError(format!("error converting configuration into json: {}", e))
        })
    }

    pub fn to_yaml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.as_yaml()?)
            .with_context(|| format!("Failed to write yaml configuration file {}", path.display()))
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.as_json()?)
            .with_context(|| format!("Failed to write json configuration file {}", path.display()))
    }

    /// Writes JSON when the extension is `.json`, YAML otherwise.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.to_json_file(path)
        } else {
            self.to_yaml_file(path)
        }
    }
}
