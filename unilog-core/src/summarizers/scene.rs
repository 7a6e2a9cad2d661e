//! Collapses a scene load and its timing report into a single line.

use regex::Regex;

/// Swallows everything from a scene start line up to the line reporting the
/// total operation time, then emits `"<start line> [<duration>ms]"`.
///
/// A block still open at end of input is lost: nothing is flushed.
#[derive(Debug, Clone)]
pub struct SceneSummarizer {
    start: Regex,
    finish: Regex,
    start_line: String,
    active: bool,
}

impl SceneSummarizer {
    pub fn new(start: Regex, finish: Regex) -> Self {
        Self {
            start,
            finish,
            start_line: String::new(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn replace(&mut self, line: &str) -> Option<String> {
        if self.start.is_match(line) {
            // No nesting: a second start line replaces the pending one.
            self.start_line = line.replace('\n', "");
            self.active = true;
            return None;
        }
        if !self.active {
            return Some(line.to_string());
        }

        let caps = self.finish.captures(line)?;
        let duration = caps.get(1).map_or("", |m| m.as_str());
        self.active = false;
        Some(format!("{} [{}ms]", std::mem::take(&mut self.start_line), duration))
    }
}
