//! Summarizers: stateful transformers that run after the skip decision.
//!
//! A summarizer receives the line produced by the previous summarizer and
//! either hands back a (possibly rewritten) line or swallows it. Like matchers,
//! live summarizers are created per stream from immutable descriptors.
//!
//! License: MIT OR APACHE 2.0

pub mod presets;
pub mod run_count;
pub mod scene;

use regex::Regex;

pub use run_count::{render_message, RunCountRule, RunCountSummarizer};
pub use scene::SceneSummarizer;

/// Compiled, stateless definition of a summarizer.
#[derive(Debug, Clone)]
pub enum SummarizerDescriptor {
    Scene { start: Regex, finish: Regex },
    RunCount(RunCountRule),
}

impl SummarizerDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Scene { .. } => presets::SCENE_SUMMARIZER_NAME,
            Self::RunCount(rule) => &rule.name,
        }
    }

    /// Builds a fresh, inactive summarizer for one stream.
    pub fn instantiate(&self) -> Summarizer {
        match self {
            Self::Scene { start, finish } => {
                Summarizer::Scene(SceneSummarizer::new(start.clone(), finish.clone()))
            }
            Self::RunCount(rule) => Summarizer::RunCount(RunCountSummarizer::new(rule.clone())),
        }
    }
}

/// A live summarizer owned by exactly one pipeline.
#[derive(Debug, Clone)]
pub enum Summarizer {
    Scene(SceneSummarizer),
    RunCount(RunCountSummarizer),
}

impl Summarizer {
    /// Feeds the next line. `None` means the line is swallowed and later
    /// summarizers must not see it.
    pub fn replace(&mut self, line: &str) -> Option<String> {
        match self {
            Self::Scene(s) => s.replace(line),
            Self::RunCount(s) => s.replace(line),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Scene(s) => s.is_active(),
            Self::RunCount(s) => s.is_active(),
        }
    }
}
