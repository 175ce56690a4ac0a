use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use bookclub_club::Club;
use bookclub_core::{AggregateRoot, CommunityKey};

use super::r#trait::{ClubStore, StoreError, check_revision, decode, encode};

#[derive(Debug, Clone)]
struct StoredClub {
    revision: u64,
    document: JsonValue,
}

/// In-memory club store.
///
/// Keeps serialized documents, so every `load` hands out an independent copy
/// the same way a database would. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryClubStore {
    clubs: RwLock<HashMap<CommunityKey, StoredClub>>,
}

impl InMemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClubStore for InMemoryClubStore {
    fn load(&self, key: CommunityKey) -> Result<Club, StoreError> {
        let clubs = self.clubs.read().map_err(|_| StoreError::Poisoned)?;
        let stored = clubs.get(&key).ok_or(StoreError::NotFound(key))?;
        decode(stored.document.clone())
    }

    fn insert(&self, club: &Club) -> Result<u64, StoreError> {
        let mut clubs = self.clubs.write().map_err(|_| StoreError::Poisoned)?;
        if clubs.contains_key(&club.key()) {
            return Err(StoreError::AlreadyExists(club.key()));
        }
        let document = encode(club, 1)?;
        clubs.insert(
            club.key(),
            StoredClub {
                revision: 1,
                document,
            },
        );
        Ok(1)
    }

    fn replace(&self, club: &Club) -> Result<u64, StoreError> {
        let mut clubs = self.clubs.write().map_err(|_| StoreError::Poisoned)?;
        let stored = clubs
            .get_mut(&club.key())
            .ok_or(StoreError::NotFound(club.key()))?;
        check_revision(club, stored.revision)?;

        let revision = club.version() + 1;
        stored.document = encode(club, revision)?;
        stored.revision = revision;
        Ok(revision)
    }
}
