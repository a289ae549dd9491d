//! Pattern matching capability shared by image filters and property rules.
//!
//! Filters and rule matching depend only on the [`Matches`] capability, not on
//! a concrete engine. The backing implementation is a case-insensitive regular
//! expression evaluated as a search, so `"Icon"` matches `"AppIcon@2x.png"`
//! without anchors.

use regex::{Regex, RegexBuilder};

/// Capability for testing a candidate string against a configured pattern.
pub trait Matches {
    /// Returns `true` when the candidate matches.
    fn matches(&self, candidate: &str) -> bool;
}

/// A single configured pattern backed by a case-insensitive regular expression.
///
/// A malformed expression disables the pattern rather than aborting the run:
/// it simply never matches.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a pattern from its configured source text.
    pub fn new(pattern: &str) -> Self {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok();

        Self { regex }
    }
}

impl Matches for Pattern {
    fn matches(&self, candidate: &str) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(candidate))
    }
}

/// An ordered list of patterns; matches when any member matches.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile every pattern in the configured list.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|pattern| Pattern::new(pattern.as_ref()))
                .collect(),
        }
    }
}

impl Matches for PatternSet {
    fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(candidate))
    }
}
