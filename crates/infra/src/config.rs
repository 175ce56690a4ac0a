//! Configuration loading and representation.
//!
//! Everything comes from `BOOKCLUB_*` environment variables; every variable
//! has a default, so an empty environment yields a working in-memory setup.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use bookclub_core::{CommunityKey, ParticipantId};
use bookclub_observability::LogFormat;

use crate::store::{ClubStore, InMemoryClubStore, JsonFileClubStore, StoreError};

pub const DATA_DIR_VAR: &str = "BOOKCLUB_DATA_DIR";
pub const LOG_FORMAT_VAR: &str = "BOOKCLUB_LOG_FORMAT";
pub const COMMUNITY_VAR: &str = "BOOKCLUB_COMMUNITY";
pub const USER_ID_VAR: &str = "BOOKCLUB_USER_ID";
pub const USER_NAME_VAR: &str = "BOOKCLUB_USER_NAME";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where clubs are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    JsonFiles(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub log_format: LogFormat,
    /// Community the console transport speaks for.
    pub community: CommunityKey,
    /// Participant the console transport acts as until switched.
    pub user_id: ParticipantId,
    pub user_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let store = match get(DATA_DIR_VAR) {
            Some(dir) => StoreBackend::JsonFiles(PathBuf::from(dir)),
            None => StoreBackend::Memory,
        };

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                var: LOG_FORMAT_VAR,
                reason,
            })?,
            None => LogFormat::default(),
        };

        let community = match get(COMMUNITY_VAR) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: COMMUNITY_VAR,
                reason: format!("{e}"),
            })?,
            None => CommunityKey::new(1),
        };

        let user_id = match get(USER_ID_VAR) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: USER_ID_VAR,
                reason: format!("{e}"),
            })?,
            None => ParticipantId::new(1),
        };

        let user_name = get(USER_NAME_VAR)
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| "guest".to_string());

        Ok(Self {
            store,
            log_format,
            community,
            user_id,
            user_name,
        })
    }

    /// Open the configured club store.
    pub fn open_store(&self) -> Result<Arc<dyn ClubStore>, StoreError> {
        match &self.store {
            StoreBackend::Memory => {
                tracing::info!("using in-memory club store");
                Ok(Arc::new(InMemoryClubStore::new()))
            }
            StoreBackend::JsonFiles(dir) => {
                tracing::info!("using JSON club store at {}", dir.display());
                Ok(Arc::new(JsonFileClubStore::open(dir)?))
            }
        }
    }
}
