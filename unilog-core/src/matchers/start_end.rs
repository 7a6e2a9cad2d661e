//! Matcher for a region delimited by a start line and an end line.

use regex::Regex;

/// Drops everything between a start and an end line. Whether the two boundary
/// lines are dropped as well is configured independently.
#[derive(Debug, Clone)]
pub struct StartEndBlockMatcher {
    start: Regex,
    end: Regex,
    match_start: bool,
    match_end: bool,
    active: bool,
}

impl StartEndBlockMatcher {
    pub fn new(start: Regex, end: Regex, match_start: bool, match_end: bool) -> Self {
        Self {
            start,
            end,
            match_start,
            match_end,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn matches(&mut self, line: &str) -> bool {
        // Start wins over end when both could match the same line.
        if self.start.is_match(line) {
            self.active = true;
            return self.match_start;
        }
        if !self.active {
            return false;
        }
        if self.end.is_match(line) {
            self.active = false;
            return self.match_end;
        }
        true
    }
}
