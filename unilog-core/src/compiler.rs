//! compiler.rs - Turns a declarative `ParserConfig` into compiled descriptors.
//!
//! Every pattern is compiled exactly once, here, when the configuration is
//! loaded. The resulting [`CompiledConfig`] is immutable and `Send + Sync`, so
//! it can be wrapped in an `Arc` and shared by any number of pipelines. The
//! stateful matcher and summarizer instances are created from it per stream by
//! [`crate::pipeline::Pipeline::new`].
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{ParserConfig, RunCountDescriptor, MAX_PATTERN_LENGTH};
use crate::errors::UnilogError;
use crate::matchers::MatcherDescriptor;
use crate::preprocess::PreprocessorSet;
use crate::summarizers::{presets, render_message, RunCountRule, SummarizerDescriptor};

/// Immutable, ready-to-run form of a [`ParserConfig`].
#[derive(Debug, Clone, Default)]
pub struct CompiledConfig {
    pub preprocessors: PreprocessorSet,
    /// Whole-line skip patterns.
    pub remove_line: Vec<Regex>,
    /// Tabulated blocks first, then start/end blocks, each sorted by name.
    pub matchers: Vec<MatcherDescriptor>,
    /// Scene, assets, C# warnings, then custom run counts sorted by name.
    pub summarizers: Vec<SummarizerDescriptor>,
}

impl ParserConfig {
    /// Compiles every pattern of this configuration. All invalid patterns are
    /// reported together in a single error.
    pub fn compile(&self) -> Result<CompiledConfig, UnilogError> {
        compile_config(self)
    }
}

/// Compiles a `ParserConfig` into a `CompiledConfig`.
pub fn compile_config(config: &ParserConfig) -> Result<CompiledConfig, UnilogError> {
    let mut compiler = PatternCompiler::default();

    let preprocessors = PreprocessorSet {
        strip_ansi: config.preprocessors.strip_ansi_escapes,
        remove_first: compiler.compile_all(
            "removeFirstMatchingFromLine",
            &config.preprocessors.remove_first_matching_from_line,
        ),
        remove_all: compiler.compile_all(
            "removeAllMatchingFromLine",
            &config.preprocessors.remove_all_matching_from_line,
        ),
    };

    let remove_line = compiler.compile_all("removeLine", &config.matchers.remove_line);

    let mut matchers = Vec::new();
    for (name, block) in &config.matchers.remove_tabulated_blocks {
        let start = compiler.compile(&format!("tabulated block '{}' start", name), &block.start);
        if let Some(start) = start {
            matchers.push(MatcherDescriptor::TabulatedBlock {
                name: name.clone(),
                start,
                match_start: block.match_start,
            });
        }
    }
    for (name, block) in &config.matchers.remove_start_end_blocks {
        let start = compiler.compile(&format!("start/end block '{}' start", name), &block.start);
        let end = compiler.compile(&format!("start/end block '{}' end", name), &block.end);
        if let (Some(start), Some(end)) = (start, end) {
            matchers.push(MatcherDescriptor::StartEndBlock {
                name: name.clone(),
                start,
                end,
                match_start: block.match_start,
                match_end: block.match_end,
            });
        }
    }

    let flags = &config.summarizers;
    let mut summarizers = Vec::new();
    if flags.enable_scene_summarizer {
        let start = compiler.compile("scene summarizer start", presets::SCENE_START_PATTERN);
        let finish = compiler.compile("scene summarizer finish", presets::SCENE_FINISH_PATTERN);
        if let (Some(start), Some(finish)) = (start, finish) {
            summarizers.push(SummarizerDescriptor::Scene { start, finish });
        }
    }
    if flags.enable_assets_summarizer {
        let rule = compiler.compile_run_count(presets::ASSETS_SUMMARIZER_NAME, &presets::assets_descriptor());
        summarizers.extend(rule.map(SummarizerDescriptor::RunCount));
    }
    if flags.enable_csc_warnings_summarizer {
        let rule = compiler
            .compile_run_count(presets::CSC_WARNINGS_SUMMARIZER_NAME, &presets::csc_warnings_descriptor());
        summarizers.extend(rule.map(SummarizerDescriptor::RunCount));
    }
    for (name, descriptor) in &flags.count_summarizers {
        let rule = compiler.compile_run_count(name, descriptor);
        summarizers.extend(rule.map(SummarizerDescriptor::RunCount));
    }

    compiler.finish()?;

    debug!(
        "Compiled configuration: {} line patterns, {} matchers, {} summarizers.",
        remove_line.len(),
        matchers.len(),
        summarizers.len()
    );
    Ok(CompiledConfig {
        preprocessors,
        remove_line,
        matchers,
        summarizers,
    })
}

/// Compiles patterns one by one while collecting every failure.
#[derive(Default)]
struct PatternCompiler {
    errors: Vec<UnilogError>,
    compiled: usize,
}

impl PatternCompiler {
    fn compile(&mut self, location: &str, pattern: &str) -> Option<Regex> {
        debug!("Attempting to compile {} with pattern '{:?}'", location, pattern);

        if pattern.is_empty() {
            self.errors.push(UnilogError::EmptyPattern(location.to_string()));
            return None;
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            self.errors.push(UnilogError::PatternLengthExceeded(
                location.to_string(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            return None;
        }

        match RegexBuilder::new(pattern)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build()
        {
            Ok(regex) => {
                self.compiled += 1;
                Some(regex)
            }
            Err(e) => {
                self.errors.push(UnilogError::PatternCompilationError(location.to_string(), e));
                None
            }
        }
    }

    fn compile_all(&mut self, section: &str, patterns: &[String]) -> Vec<Regex> {
        patterns
            .iter()
            .enumerate()
            .filter_map(|(i, pattern)| self.compile(&format!("{}[{}]", section, i), pattern))
            .collect()
    }

    fn compile_run_count(&mut self, name: &str, descriptor: &RunCountDescriptor) -> Option<RunCountRule> {
        let errors_before = self.errors.len();

        if descriptor.count_patterns.is_empty() {
            self.errors.push(UnilogError::InvalidSummarizer(
                name.to_string(),
                "countPatterns must not be empty".to_string(),
            ));
        }
        if descriptor.multiplicative_print && descriptor.multiplicative_base == 0 {
            self.errors.push(UnilogError::InvalidSummarizer(
                name.to_string(),
                "multiplicativeBase must be greater than zero when multiplicativePrint is set".to_string(),
            ));
        }
        if let Err(e) = render_message(&descriptor.message_template, 0) {
            self.errors.push(e);
        }

        let count_patterns = self.compile_all(
            &format!("summarizer '{}' countPatterns", name),
            &descriptor.count_patterns,
        );
        let finish_pattern = descriptor
            .finish_pattern
            .as_deref()
            .and_then(|p| self.compile(&format!("summarizer '{}' finishPattern", name), p));

        if self.errors.len() > errors_before {
            return None;
        }
        Some(RunCountRule {
            name: name.to_string(),
            count_patterns,
            finish_pattern,
            multiplicative_print: descriptor.multiplicative_print,
            multiplicative_from: descriptor.multiplicative_from,
            multiplicative_base: descriptor.multiplicative_base,
            message_template: descriptor.message_template.clone(),
        })
    }

    fn finish(self) -> Result<(), UnilogError> {
        if self.errors.is_empty() {
            debug!("Finished compiling patterns. Total compiled: {}.", self.compiled);
            return Ok(());
        }
        let error_message = self
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(UnilogError::Fatal(format!(
            "Failed to compile {} pattern(s):\n{}",
            self.errors.len(),
            error_message
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StartEndBlock, TabulatedBlock};

    #[test]
    fn default_config_compiles() -> anyhow::Result<()> {
        let compiled = ParserConfig::load_default()?.compile()?;
        assert_eq!(compiled.preprocessors.remove_all.len(), 2);
        assert_eq!(compiled.matchers.len(), 12);
        let names: Vec<&str> = compiled.summarizers.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["scene", "assets", "cscWarnings"]);
        Ok(())
    }

    #[test]
    fn matchers_are_ordered_by_kind_then_name() -> anyhow::Result<()> {
        let mut config = ParserConfig::default();
        for name in ["zeta", "alpha"] {
            config.matchers.remove_start_end_blocks.insert(
                name.to_string(),
                StartEndBlock { start: "^B".into(), end: "^E".into(), ..Default::default() },
            );
            config
                .matchers
                .remove_tabulated_blocks
                .insert(name.to_string(), TabulatedBlock { start: "^S".into(), match_start: true });
        }
        let compiled = config.compile()?;
        let names: Vec<&str> = compiled.matchers.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "alpha", "zeta"]);
        assert!(matches!(compiled.matchers[0], MatcherDescriptor::TabulatedBlock { .. }));
        assert!(matches!(compiled.matchers[2], MatcherDescriptor::StartEndBlock { .. }));
        Ok(())
    }

    #[test]
    fn all_invalid_patterns_are_reported_together() {
        let mut config = ParserConfig::default();
        config.preprocessors.remove_all_matching_from_line = vec!["(".to_string()];
        config.matchers.remove_line = vec!["ok".to_string(), "[".to_string()];
        config
            .matchers
            .remove_tabulated_blocks
            .insert("empty".to_string(), TabulatedBlock { start: String::new(), match_start: true });

        let err = config.compile().unwrap_err().to_string();
        assert!(err.contains("Failed to compile 3 pattern(s)"), "{}", err);
        assert!(err.contains("removeAllMatchingFromLine[0]"));
        assert!(err.contains("removeLine[1]"));
        assert!(err.contains("tabulated block 'empty' start"));
    }

    #[test]
    fn misspelled_block_start_is_rejected() -> anyhow::Result<()> {
        // "strat" is ignored, leaving `start` empty.
        let config = ParserConfig::from_yaml_str(
            "matchers:\n  removeStartEndBlocks:\n    typo:\n      strat: '^B$'\n      end: '^E$'\n",
        )?;
        let err = config.compile().unwrap_err().to_string();
        assert!(err.contains("Pattern for start/end block 'typo' start is empty"), "{}", err);
        Ok(())
    }

    #[test]
    fn overlong_pattern_is_rejected() {
        let mut config = ParserConfig::default();
        config.matchers.remove_line = vec!["a".repeat(MAX_PATTERN_LENGTH + 1)];
        let err = config.compile().unwrap_err().to_string();
        assert!(err.contains("exceeds maximum allowed"), "{}", err);
    }

    #[test]
    fn invalid_run_count_descriptor_is_rejected() {
        let mut config = ParserConfig::default();
        config.summarizers.count_summarizers.insert(
            "broken".to_string(),
            RunCountDescriptor {
                count_patterns: vec!["^M$".to_string()],
                multiplicative_base: 0,
                message_template: "{missing} lines".to_string(),
                ..Default::default()
            },
        );
        let err = config.compile().unwrap_err().to_string();
        assert!(err.contains("multiplicativeBase"), "{}", err);
        assert!(err.contains("Invalid message template"), "{}", err);
    }

    #[test]
    fn custom_run_counts_follow_presets() -> anyhow::Result<()> {
        let mut config = ParserConfig::default();
        config.summarizers.enable_scene_summarizer = true;
        config.summarizers.count_summarizers.insert(
            "downloads".to_string(),
            RunCountDescriptor {
                count_patterns: vec!["^Downloading ".to_string()],
                ..Default::default()
            },
        );
        let compiled = config.compile()?;
        let names: Vec<&str> = compiled.summarizers.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["scene", "downloads"]);
        Ok(())
    }
}
