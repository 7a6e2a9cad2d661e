//! Matcher for a start line followed by a run of indented lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A line starting with whitespace and carrying some content.
    static ref INDENTED_LINE: Regex = Regex::new(r"^\s+.+$").unwrap();
}

/// Drops a start line (optionally) and every indented line directly after it.
/// The first non-indented line ends the block and is left alone.
#[derive(Debug, Clone)]
pub struct TabulatedBlockMatcher {
    start: Regex,
    match_start: bool,
    active: bool,
}

impl TabulatedBlockMatcher {
    pub fn new(start: Regex, match_start: bool) -> Self {
        Self {
            start,
            match_start,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn matches(&mut self, line: &str) -> bool {
        // A new start line always (re)opens the block, even inside one.
        if self.start.is_match(line) {
            self.active = true;
            return self.match_start;
        }
        if !self.active {
            return false;
        }
        if INDENTED_LINE.is_match(line) {
            return true;
        }
        self.active = false;
        false
    }
}
