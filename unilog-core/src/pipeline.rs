//! The line pipeline: drives one line at a time through
//! preprocessors → whole-line skip patterns → block matchers → summarizers.
//!
//! A [`Pipeline`] owns the live matcher and summarizer instances for exactly one
//! input stream. To process several streams, build one pipeline per stream from
//! the same shared [`CompiledConfig`].
//!
//! License: MIT OR APACHE 2.0

use log::trace;
use std::sync::Arc;

use crate::compiler::CompiledConfig;
use crate::matchers::LineMatcher;
use crate::summarizers::Summarizer;

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines_read: u64,
    pub lines_emitted: u64,
    pub lines_suppressed: u64,
}

/// Stateful, single-stream line transformer.
#[derive(Debug)]
pub struct Pipeline {
    compiled: Arc<CompiledConfig>,
    matchers: Vec<LineMatcher>,
    summarizers: Vec<Summarizer>,
    stats: PipelineStats,
}

impl Pipeline {
    /// Instantiates fresh matcher and summarizer state from `compiled`.
    pub fn new(compiled: Arc<CompiledConfig>) -> Self {
        let matchers = compiled.matchers.iter().map(|d| d.instantiate()).collect();
        let summarizers = compiled.summarizers.iter().map(|d| d.instantiate()).collect();
        Self {
            compiled,
            matchers,
            summarizers,
            stats: PipelineStats::default(),
        }
    }

    /// Names of the matchers and summarizers still inside a block or run.
    /// Whatever they are holding back is never emitted once input ends.
    pub fn open_blocks(&self) -> Vec<&str> {
        let matchers = self
            .compiled
            .matchers
            .iter()
            .zip(&self.matchers)
            .filter(|(_, live)| live.is_active())
            .map(|(descriptor, _)| descriptor.name());
        let summarizers = self
            .compiled
            .summarizers
            .iter()
            .zip(&self.summarizers)
            .filter(|(_, live)| live.is_active())
            .map(|(descriptor, _)| descriptor.name());
        matchers.chain(summarizers).collect()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Feeds the next input line. Returns the text to emit, or `None` if the
    /// line was suppressed. The returned text may span several lines when a
    /// summarizer prepends a tally.
    pub fn process_line(&mut self, line: &str) -> Option<String> {
        self.stats.lines_read += 1;
        let result = self.transform(line);
        match result {
            Some(_) => self.stats.lines_emitted += 1,
            None => self.stats.lines_suppressed += 1,
        }
        result
    }

    fn transform(&mut self, line: &str) -> Option<String> {
        let line = self.compiled.preprocessors.apply(line);

        if self.compiled.remove_line.iter().any(|r| r.is_match(&line)) {
            trace!("Dropped by line pattern: {}", line);
            return None;
        }

        // Every matcher sees every line that gets this far so its state only
        // depends on the stream, not on the other matchers.
        let mut skip = false;
        for matcher in &mut self.matchers {
            skip |= matcher.matches(&line);
        }
        if skip {
            trace!("Dropped by block matcher: {}", line);
            return None;
        }

        let mut line = line.into_owned();
        for summarizer in &mut self.summarizers {
            line = summarizer.replace(&line)?;
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParserConfig, StartEndBlock};

    fn pipeline(config: &ParserConfig) -> Pipeline {
        Pipeline::new(Arc::new(config.compile().unwrap()))
    }

    fn run(p: &mut Pipeline, lines: &[&str]) -> Vec<String> {
        lines.iter().filter_map(|l| p.process_line(l)).collect()
    }

    #[test]
    fn empty_config_is_identity() {
        let mut p = pipeline(&ParserConfig::default());
        let lines = ["a", "", "  indented", "Loaded scene 'x'"];
        assert_eq!(run(&mut p, &lines), lines.to_vec());
        assert_eq!(p.stats().lines_emitted, 4);
    }

    #[test]
    fn skip_decision_uses_preprocessed_line() {
        let mut config = ParserConfig::default();
        config.preprocessors.remove_first_matching_from_line = vec![r"^\[\d+\] ".to_string()];
        config.matchers.remove_line = vec!["^noise$".to_string()];
        let mut p = pipeline(&config);
        assert_eq!(run(&mut p, &["[1] noise", "[2] signal"]), vec!["signal"]);
        assert_eq!(
            p.stats(),
            PipelineStats { lines_read: 2, lines_emitted: 1, lines_suppressed: 1 }
        );
    }

    #[test]
    fn every_block_matcher_observes_each_line() {
        let mut config = ParserConfig::default();
        config.matchers.remove_start_end_blocks.insert(
            "a".to_string(),
            StartEndBlock { start: "^A$".into(), end: "^Z$".into(), match_start: true, match_end: true },
        );
        config.matchers.remove_start_end_blocks.insert(
            "b".to_string(),
            StartEndBlock { start: "^S$".into(), end: "^T$".into(), match_start: false, match_end: false },
        );
        let mut p = pipeline(&config);
        // "b" closes on "T" even though "a" drops that line.
        assert_eq!(run(&mut p, &["S", "A", "T", "Z", "after"]), vec!["S", "after"]);
    }

    #[test]
    fn whole_line_patterns_hide_lines_from_block_matchers() {
        let mut config = ParserConfig::default();
        config.matchers.remove_line = vec!["^B$".to_string()];
        config.matchers.remove_start_end_blocks.insert(
            "a".to_string(),
            StartEndBlock { start: "^B$".into(), end: "^E$".into(), ..Default::default() },
        );
        let mut p = pipeline(&config);
        assert_eq!(run(&mut p, &["B", "x", "E"]), vec!["x", "E"]);
    }

    #[test]
    fn suppressing_summarizer_stops_the_chain() {
        let mut config = ParserConfig::default();
        config.summarizers.enable_scene_summarizer = true;
        config.summarizers.enable_csc_warnings_summarizer = true;
        let mut p = pipeline(&config);
        let out = run(
            &mut p,
            &[
                "Loaded scene 'Main'",
                "A.cs(1,2): warning CS0001: hidden inside the scene block",
                "  Total Operation Time: 4.2 s",
                "B.cs(3,4): warning CS0168: unused",
                "done",
            ],
        );
        assert_eq!(
            out,
            vec![
                "Loaded scene 'Main' [4.2ms]",
                "1 C# compiler warnings",
                "1 C# compiler warnings\ndone",
            ]
        );
    }

    #[test]
    fn open_blocks_lists_unterminated_blocks_and_runs() {
        let mut config = ParserConfig::default();
        config.summarizers.enable_scene_summarizer = true;
        config.summarizers.enable_csc_warnings_summarizer = true;
        config.matchers.remove_start_end_blocks.insert(
            "cover".to_string(),
            StartEndBlock { start: "^B$".into(), end: "^E$".into(), ..Default::default() },
        );
        let mut p = pipeline(&config);
        assert!(p.open_blocks().is_empty());

        p.process_line("Loaded scene 'Main'");
        p.process_line("B");
        assert_eq!(p.open_blocks(), vec!["cover", "scene"]);

        p.process_line("E");
        p.process_line("  Total Operation Time: 1.5 s");
        p.process_line("A.cs(1,2): warning CS0001: unused");
        assert_eq!(p.open_blocks(), vec!["cscWarnings"]);

        p.process_line("done");
        assert!(p.open_blocks().is_empty());
    }

    #[test]
    fn pipelines_from_one_config_are_independent() {
        let mut config = ParserConfig::default();
        config.matchers.remove_start_end_blocks.insert(
            "a".to_string(),
            StartEndBlock { start: "^B$".into(), end: "^E$".into(), match_start: true, match_end: true },
        );
        let compiled = Arc::new(config.compile().unwrap());
        let mut first = Pipeline::new(Arc::clone(&compiled));
        let mut second = Pipeline::new(compiled);

        assert_eq!(first.process_line("B"), None);
        assert_eq!(second.process_line("x"), Some("x".to_string()));
        assert_eq!(first.process_line("x"), None);
    }
}
