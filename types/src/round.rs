//! Acquisition round identity.

use std::fmt;

/// Monotonically increasing identifier for one acquisition round.
///
/// Every fetch result is tagged with the round that issued it; a result
/// whose round does not match the current one is stale and must be
/// discarded rather than applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RoundId(u64);

impl RoundId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_are_ordered_and_distinct() {
        let first = RoundId::first();
        let second = first.next();
        assert_ne!(first, second);
        assert_eq!(second.value(), first.value() + 1);
    }
}
