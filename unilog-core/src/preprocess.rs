//! Stateless preprocessors.
//!
//! Preprocessors strip substrings out of a line before any skip or summarize
//! decision is taken. They carry no state between lines, so one
//! [`PreprocessorSet`] can be shared by any number of pipelines.
//!
//! License: MIT OR APACHE 2.0

use regex::Regex;
use std::borrow::Cow;
use strip_ansi_escapes::strip_str;

/// Compiled preprocessor patterns, applied in a fixed order:
/// ANSI stripping, then remove-first patterns, then remove-all patterns.
#[derive(Debug, Clone, Default)]
pub struct PreprocessorSet {
    pub strip_ansi: bool,
    pub remove_first: Vec<Regex>,
    pub remove_all: Vec<Regex>,
}

impl PreprocessorSet {
    pub fn is_empty(&self) -> bool {
        !self.strip_ansi && self.remove_first.is_empty() && self.remove_all.is_empty()
    }

    /// Returns the line with every configured substring removed.
    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.is_empty() {
            return Cow::Borrowed(line);
        }

        let mut line = if self.strip_ansi {
            strip_str(line)
        } else {
            line.to_string()
        };

        for regex in &self.remove_first {
            remove_first_match(regex, &mut line);
        }

        for regex in &self.remove_all {
            line = regex.replace_all(&line, "").into_owned();
        }

        Cow::Owned(line)
    }
}

/// Deletes the leftmost match of `regex` from `line`. Empty matches are ignored.
fn remove_first_match(regex: &Regex, line: &mut String) {
    let range = match regex.find(line) {
        Some(m) if !m.as_str().is_empty() => m.range(),
        _ => return,
    };
    line.replace_range(range, "");
}
