//! Infrastructure layer: club persistence, load-mutate-store orchestration, config.

pub mod club_service;
pub mod config;
pub mod store;

pub use club_service::{ClubService, ServiceError};
pub use config::{Config, ConfigError, StoreBackend};
pub use store::{ClubStore, InMemoryClubStore, JsonFileClubStore, StoreError};
