//! Aggregate root trait for domain models persisted as whole documents.

/// Aggregate root marker + minimal interface.
///
/// Aggregates are loaded in full, mutated in memory, and replaced wholesale.
/// The version is the persisted revision the in-memory copy was loaded at.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Revision of the stored document this value was loaded from.
    ///
    /// Zero means the aggregate has never been stored.
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation: the stored revision a write was
/// based on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExpectedVersion(pub u64);

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        self.0 == actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_the_exact_revision() {
        assert!(ExpectedVersion(3).matches(3));
        assert!(!ExpectedVersion(3).matches(2));
        assert!(!ExpectedVersion(3).matches(4));
    }
}
