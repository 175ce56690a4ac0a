use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use bookclub_club::Club;
use bookclub_core::{AggregateRoot, CommunityKey, ExpectedVersion};

/// Club store operation error.
///
/// These are **infrastructure errors**, kept apart from domain errors so a
/// caller can tell "the write did not happen" from "the request was invalid".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no club stored for community {0}")]
    NotFound(CommunityKey),

    #[error("a club is already stored for community {0}")]
    AlreadyExists(CommunityKey),

    #[error("optimistic concurrency check failed (expected revision {expected}, found {actual})")]
    Concurrency { expected: u64, actual: u64 },

    #[error("club document could not be (de)serialized: {0}")]
    Serialization(String),

    #[error("storage io failed: {0}")]
    Io(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Persistence collaborator for clubs, keyed by community.
///
/// Contract:
/// - `load` returns the full club at its stored revision, or `NotFound`.
/// - `insert` stores a new club at revision 1 and fails if one exists.
/// - `replace` overwrites the whole document only if the stored revision
///   equals `club.version()`; it returns the new revision.
pub trait ClubStore: Send + Sync {
    fn load(&self, key: CommunityKey) -> Result<Club, StoreError>;

    fn insert(&self, club: &Club) -> Result<u64, StoreError>;

    fn replace(&self, club: &Club) -> Result<u64, StoreError>;
}

impl<S> ClubStore for Arc<S>
where
    S: ClubStore + ?Sized,
{
    fn load(&self, key: CommunityKey) -> Result<Club, StoreError> {
        (**self).load(key)
    }

    fn insert(&self, club: &Club) -> Result<u64, StoreError> {
        (**self).insert(club)
    }

    fn replace(&self, club: &Club) -> Result<u64, StoreError> {
        (**self).replace(club)
    }
}

/// Check a replace against the stored revision.
pub(crate) fn check_revision(club: &Club, stored: u64) -> Result<(), StoreError> {
    if ExpectedVersion(club.version()).matches(stored) {
        Ok(())
    } else {
        Err(StoreError::Concurrency {
            expected: club.version(),
            actual: stored,
        })
    }
}

/// Serialize `club` as it will look at `revision`.
pub(crate) fn encode(club: &Club, revision: u64) -> Result<JsonValue, StoreError> {
    let mut stored = club.clone();
    stored.mark_persisted(revision);
    serde_json::to_value(&stored).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub(crate) fn decode(document: JsonValue) -> Result<Club, StoreError> {
    serde_json::from_value(document).map_err(|e| StoreError::Serialization(e.to_string()))
}
