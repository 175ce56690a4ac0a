//! Load-mutate-store orchestration for club commands.
//!
//! ```text
//! command
//!   ↓
//! 1. Load the club for the community (create + insert an empty one on first use)
//!   ↓
//! 2. Run the domain operation against the in-memory club
//!   ↓
//! 3. Replace the stored document, checked against the loaded revision
//! ```
//!
//! Domain code stays pure; this module owns the only IO. A failed domain
//! operation writes nothing. A lost race on the revision check surfaces as
//! `StoreError::Concurrency` and is not retried here.

use chrono::{DateTime, Utc};
use thiserror::Error;

use bookclub_club::Club;
use bookclub_core::{AggregateRoot, CommunityKey, DomainError, DomainResult};

use crate::store::{ClubStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The operation was rejected by the club's rules. Nothing was written.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Persistence failed; the change did not take effect.
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Whether a concurrent write to the same club won the race.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Store(StoreError::Concurrency { .. }))
    }
}

/// Runs club operations against a [`ClubStore`], one community at a time.
#[derive(Debug)]
pub struct ClubService<S> {
    store: S,
}

impl<S> ClubService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> ClubService<S>
where
    S: ClubStore,
{
    /// Load the club for `key`, creating an empty one anchored at `now` if
    /// none is stored yet.
    pub fn load_or_create(
        &self,
        key: CommunityKey,
        now: DateTime<Utc>,
    ) -> Result<Club, StoreError> {
        match self.store.load(key) {
            Ok(club) => {
                tracing::debug!("loaded club {} at revision {}", key, club.version());
                Ok(club)
            }
            Err(StoreError::NotFound(_)) => {
                tracing::info!("no club stored for community {}; creating one", key);
                let mut club = Club::new(key, now);
                match self.store.insert(&club) {
                    Ok(revision) => {
                        club.mark_persisted(revision);
                        Ok(club)
                    }
                    // Another command created it first.
                    Err(StoreError::AlreadyExists(_)) => self.store.load(key),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a mutating operation and persist the result.
    pub fn execute<T>(
        &self,
        key: CommunityKey,
        now: DateTime<Utc>,
        operation: impl FnOnce(&mut Club) -> DomainResult<T>,
    ) -> Result<T, ServiceError> {
        self.execute_with(key, now, |club| operation(club).map_err(ServiceError::from))
    }

    /// Like [`ClubService::execute`], for operations with their own error type.
    ///
    /// Nothing is written when `operation` fails.
    pub fn execute_with<T, E>(
        &self,
        key: CommunityKey,
        now: DateTime<Utc>,
        operation: impl FnOnce(&mut Club) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut club = self.load_or_create(key, now)?;
        let output = operation(&mut club)?;

        match self.store.replace(&club) {
            Ok(revision) => {
                tracing::info!("stored club {} at revision {}", key, revision);
                Ok(output)
            }
            Err(e) => {
                if let StoreError::Concurrency { .. } = e {
                    tracing::warn!("concurrent update to club {} rejected: {}", key, e);
                } else {
                    tracing::error!("failed to store club {}: {}", key, e);
                }
                Err(e.into())
            }
        }
    }

    /// Run a read-only query against the current club.
    pub fn query<T>(
        &self,
        key: CommunityKey,
        now: DateTime<Utc>,
        query: impl FnOnce(&Club) -> DomainResult<T>,
    ) -> Result<T, ServiceError> {
        self.query_with(key, now, |club| query(club).map_err(ServiceError::from))
    }

    /// Like [`ClubService::query`], for queries with their own error type.
    pub fn query_with<T, E>(
        &self,
        key: CommunityKey,
        now: DateTime<Utc>,
        query: impl FnOnce(&Club) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let club = self.load_or_create(key, now)?;
        query(&club)
    }
}
