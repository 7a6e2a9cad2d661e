//! Compresses runs of repetitive lines into periodic progress messages.

use log::warn;
use regex::Regex;
use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::errors::UnilogError;

/// Compiled form of a [`crate::config::RunCountDescriptor`].
#[derive(Debug, Clone)]
pub struct RunCountRule {
    pub name: String,
    pub count_patterns: Vec<Regex>,
    pub finish_pattern: Option<Regex>,
    pub multiplicative_print: bool,
    pub multiplicative_from: u64,
    pub multiplicative_base: u64,
    pub message_template: String,
}

#[derive(Serialize)]
struct MessageContext {
    count: u64,
}

/// Renders a run-count message template for `count`.
pub fn render_message(template: &str, count: u64) -> Result<String, UnilogError> {
    let mut tt = TinyTemplate::new();
    tt.add_template("message", template)
        .map_err(|e| UnilogError::InvalidTemplate(template.to_string(), e.to_string()))?;
    tt.render("message", &MessageContext { count })
        .map_err(|e| UnilogError::InvalidTemplate(template.to_string(), e.to_string()))
}

/// Turns a run of lines matching any count pattern into progress messages and
/// closes the run with a tally placed in front of the line that ended it.
///
/// A run still open at end of input never gets its tally.
#[derive(Debug, Clone)]
pub struct RunCountSummarizer {
    rule: RunCountRule,
    count: u64,
    active: bool,
}

impl RunCountSummarizer {
    pub fn new(rule: RunCountRule) -> Self {
        Self {
            rule,
            count: 0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn replace(&mut self, line: &str) -> Option<String> {
        let matched = self.rule.count_patterns.iter().any(|r| r.is_match(line));
        if matched {
            self.count += 1;
            self.active = true;
            return self.should_print().then(|| self.message());
        }
        if !self.active {
            return Some(line.to_string());
        }

        let finished = self
            .rule
            .finish_pattern
            .as_ref()
            .map_or(true, |r| r.is_match(line));
        if !finished {
            return None;
        }

        let tally = self.message();
        self.count = 0;
        self.active = false;
        Some(format!("{}\n{}", tally, line))
    }

    fn should_print(&self) -> bool {
        let rule = &self.rule;
        !rule.multiplicative_print
            || self.count <= rule.multiplicative_from
            || (rule.multiplicative_base != 0 && self.count % rule.multiplicative_base == 0)
    }

    fn message(&self) -> String {
        render_message(&self.rule.message_template, self.count).unwrap_or_else(|e| {
            warn!("Summarizer '{}': {}", self.rule.name, e);
            self.count.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(finish: Option<&str>, multiplicative: bool, from: u64, base: u64) -> RunCountRule {
        RunCountRule {
            name: "test".to_string(),
            count_patterns: vec![Regex::new("^M$").unwrap(), Regex::new("^N$").unwrap()],
            finish_pattern: finish.map(|p| Regex::new(p).unwrap()),
            multiplicative_print: multiplicative,
            multiplicative_from: from,
            multiplicative_base: base,
            message_template: "count={count}".to_string(),
        }
    }

    fn run(s: &mut RunCountSummarizer, lines: &[&str]) -> Vec<String> {
        lines.iter().filter_map(|l| s.replace(l)).collect()
    }

    #[test]
    fn multiplicative_progress_and_final_tally() {
        let mut s = RunCountSummarizer::new(rule(Some("^F$"), true, 2, 3));
        let out = run(&mut s, &["M", "M", "M", "M", "M", "F"]);
        assert_eq!(out, vec!["count=1", "count=2", "count=3", "count=5\nF"]);
        assert!(!s.is_active());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn every_match_prints_without_multiplicative_mode() {
        let mut s = RunCountSummarizer::new(rule(None, false, 0, 0));
        let out = run(&mut s, &["M", "N", "M", "done"]);
        assert_eq!(out, vec!["count=1", "count=2", "count=3", "count=3\ndone"]);
    }

    #[test]
    fn first_unmatched_line_ends_run_without_finish_pattern() {
        let mut s = RunCountSummarizer::new(rule(None, true, 10, 100));
        let out = run(&mut s, &["before", "M", "after", "later"]);
        assert_eq!(out, vec!["before", "count=1", "count=1\nafter", "later"]);
    }

    #[test]
    fn unmatched_lines_inside_run_are_dropped_until_finish() {
        let mut s = RunCountSummarizer::new(rule(Some("^F$"), true, 10, 100));
        let out = run(&mut s, &["M", "noise", "M", "F", "tail"]);
        assert_eq!(out, vec!["count=1", "count=2", "count=2\nF", "tail"]);
    }

    #[test]
    fn finish_line_without_a_run_passes_through() {
        let mut s = RunCountSummarizer::new(rule(Some("^F$"), true, 10, 100));
        assert_eq!(run(&mut s, &["F"]), vec!["F"]);
    }

    #[test]
    fn long_run_prints_checkpoints_only() {
        let mut s = RunCountSummarizer::new(rule(Some("^F$"), true, 10, 100));
        let mut lines = vec!["M"; 250];
        lines.push("F");
        let out = run(&mut s, &lines);
        let expected: Vec<String> = (1..=10)
            .chain([100, 200])
            .map(|n| format!("count={}", n))
            .chain(std::iter::once("count=250\nF".to_string()))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn unterminated_run_keeps_counting() {
        let mut s = RunCountSummarizer::new(rule(Some("^F$"), true, 1, 100));
        let out = run(&mut s, &["M", "M", "x"]);
        assert_eq!(out, vec!["count=1"]);
        assert!(s.is_active());
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn render_message_rejects_broken_templates() {
        assert_eq!(render_message("Imported {count} Assets", 7).unwrap(), "Imported 7 Assets");
        assert!(render_message("Imported {total} Assets", 7).is_err());
    }
}
