//! Occurrence-count gating.

use tracing::{debug, warn};

/// A named expected-count gate for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRule {
    pub name: String,
    pub expected: usize,
}

impl ValidationRule {
    pub fn new(name: impl Into<String>, expected: usize) -> Self {
        Self {
            name: name.into(),
            expected,
        }
    }

    /// True iff `actual` matches the expectation; logs the mismatch otherwise
    pub fn check(&self, actual: usize) -> bool {
        assert_count(&self.name, self.expected, actual)
    }
}

/// Compare an observed occurrence count against the recorded expectation.
///
/// Patterns are discovered empirically against one specific binary build. A
/// count that differs from the recorded expectation is treated as proof the
/// layout assumption no longer holds (e.g. after a game update), and the
/// dependent patch must not run.
pub fn assert_count(name: &str, expected: usize, actual: usize) -> bool {
    if actual != expected {
        warn!(
            "{}: expected {} occurrence(s), found {}",
            name, expected, actual
        );
        return false;
    }

    debug!("{}: {} occurrence(s), as expected", name, actual);
    true
}
