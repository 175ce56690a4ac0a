//! Domain error model.

use thiserror::Error;

use crate::id::{BookId, ParticipantId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// What a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Host(ParticipantId),
    Book(BookId),
    /// The participant is not a member of the rotation queue.
    QueueMember(ParticipantId),
}

impl core::fmt::Display for Missing {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Missing::Host(id) => write!(f, "host {id}"),
            Missing::Book(id) => write!(f, "book {id}"),
            Missing::QueueMember(id) => write!(f, "queue member {id}"),
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Storage
/// concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A participant with this id is already registered.
    #[error("already exists: participant {0}")]
    AlreadyExists(ParticipantId),

    /// A referenced host, book, or queue member does not exist.
    #[error("not found: {0}")]
    NotFound(Missing),

    /// A queue update names a participant that is not registered.
    #[error("invalid reference: participant {0} is not registered")]
    InvalidReference(ParticipantId),

    /// Session resolution was attempted with nobody in the rotation queue.
    #[error("the rotation queue is empty")]
    EmptyQueue,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Date arithmetic left the representable calendar.
    #[error("date out of range")]
    OutOfRange,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn host_not_found(id: ParticipantId) -> Self {
        Self::NotFound(Missing::Host(id))
    }

    pub fn book_not_found(id: BookId) -> Self {
        Self::NotFound(Missing::Book(id))
    }
}
