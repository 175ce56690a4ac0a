//! `bookclub-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;

pub use aggregate::{AggregateRoot, ExpectedVersion};
pub use entity::{Entity, find_entity};
pub use error::{DomainError, DomainResult, Missing};
pub use id::{BookId, CommunityKey, ParticipantId};
