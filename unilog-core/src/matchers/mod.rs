//! Stateful line matchers.
//!
//! A matcher decides, one line at a time, whether the line belongs to a block
//! that must be dropped entirely. Matchers keep private automaton state between
//! calls, so every pipeline gets its own instances via
//! [`MatcherDescriptor::instantiate`]; descriptors themselves are immutable and
//! can be shared freely.
//!
//! License: MIT OR APACHE 2.0

pub mod start_end;
pub mod tabulated;

use regex::Regex;

pub use start_end::StartEndBlockMatcher;
pub use tabulated::TabulatedBlockMatcher;

/// Compiled, stateless definition of a block matcher.
#[derive(Debug, Clone)]
pub enum MatcherDescriptor {
    TabulatedBlock {
        name: String,
        start: Regex,
        match_start: bool,
    },
    StartEndBlock {
        name: String,
        start: Regex,
        end: Regex,
        match_start: bool,
        match_end: bool,
    },
}

impl MatcherDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::TabulatedBlock { name, .. } | Self::StartEndBlock { name, .. } => name,
        }
    }

    /// Builds a fresh, inactive matcher for one stream.
    pub fn instantiate(&self) -> LineMatcher {
        match self {
            Self::TabulatedBlock { start, match_start, .. } => {
                LineMatcher::Tabulated(TabulatedBlockMatcher::new(start.clone(), *match_start))
            }
            Self::StartEndBlock { start, end, match_start, match_end, .. } => LineMatcher::StartEnd(
                StartEndBlockMatcher::new(start.clone(), end.clone(), *match_start, *match_end),
            ),
        }
    }
}

/// A live matcher owned by exactly one pipeline.
#[derive(Debug, Clone)]
pub enum LineMatcher {
    Tabulated(TabulatedBlockMatcher),
    StartEnd(StartEndBlockMatcher),
}

impl LineMatcher {
    /// Feeds the next line of the stream. Returns `true` when the line must be dropped.
    pub fn matches(&mut self, line: &str) -> bool {
        match self {
            Self::Tabulated(m) => m.matches(line),
            Self::StartEnd(m) => m.matches(line),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Tabulated(m) => m.is_active(),
            Self::StartEnd(m) => m.is_active(),
        }
    }
}
