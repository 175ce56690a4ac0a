use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use bookclub_core::{
    AggregateRoot, BookId, CommunityKey, DomainError, DomainResult, Entity, Missing,
    ParticipantId, find_entity,
};
use bookclub_schedule::{host_index, month_distance};

/// A registered participant who can host sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: ParticipantId,
    pub name: String,
    /// Book this host plans to present. May dangle if the book was deleted.
    pub next_book: Option<BookId>,
}

impl Entity for Host {
    type Id = ParticipantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A candidate book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub author: String,
    pub title: String,
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Aggregate root: one reading club per community.
///
/// Hosts and books are kept in registration order; their ids are the source
/// of identity. Removing a host or book does not scrub references to it from
/// the queue or from other hosts, so readers get `None` for vanished entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    key: CommunityKey,
    hosts: Vec<Host>,
    books: Vec<Book>,
    queue: Vec<ParticipantId>,
    start_queue_index: usize,
    anchor_time: DateTime<Utc>,
    version: u64,
}

impl Club {
    /// Create an empty club whose rotation epoch is `anchor_time`.
    pub fn new(key: CommunityKey, anchor_time: DateTime<Utc>) -> Self {
        Self {
            key,
            hosts: Vec::new(),
            books: Vec::new(),
            queue: Vec::new(),
            start_queue_index: 0,
            anchor_time,
            version: 0,
        }
    }

    pub fn key(&self) -> CommunityKey {
        self.key
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn queue(&self) -> &[ParticipantId] {
        &self.queue
    }

    pub fn start_queue_index(&self) -> usize {
        self.start_queue_index
    }

    pub fn anchor_time(&self) -> DateTime<Utc> {
        self.anchor_time
    }

    pub fn host(&self, id: ParticipantId) -> Option<&Host> {
        find_entity(&self.hosts, &id)
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        find_entity(&self.books, &id)
    }

    /// The book a host plans to present, if set and still present.
    pub fn next_book_of(&self, host: &Host) -> Option<&Book> {
        host.next_book.and_then(|id| self.book(id))
    }

    /// Record the revision this value now corresponds to in storage.
    ///
    /// Only the persistence layer should call this.
    pub fn mark_persisted(&mut self, version: u64) {
        self.version = version;
    }

    pub fn add_host(&mut self, id: ParticipantId, name: impl Into<String>) -> DomainResult<()> {
        if self.host(id).is_some() {
            return Err(DomainError::AlreadyExists(id));
        }
        self.hosts.push(Host {
            id,
            name: name.into(),
            next_book: None,
        });
        Ok(())
    }

    pub fn remove_host(&mut self, id: ParticipantId) -> DomainResult<Host> {
        let pos = self
            .hosts
            .iter()
            .position(|h| h.id == id)
            .ok_or(DomainError::host_not_found(id))?;
        Ok(self.hosts.remove(pos))
    }

    /// Add a book under a freshly generated id.
    pub fn add_book(&mut self, author: impl Into<String>, title: impl Into<String>) -> BookId {
        let id = BookId::new();
        self.books.push(Book {
            id,
            author: author.into(),
            title: title.into(),
        });
        id
    }

    pub fn delete_book(&mut self, id: BookId) -> DomainResult<Book> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(DomainError::book_not_found(id))?;
        Ok(self.books.remove(pos))
    }

    pub fn set_next_book(&mut self, host_id: ParticipantId, book_id: BookId) -> DomainResult<()> {
        if self.book(book_id).is_none() {
            return Err(DomainError::book_not_found(book_id));
        }
        let host = self
            .hosts
            .iter_mut()
            .find(|h| h.id == host_id)
            .ok_or(DomainError::host_not_found(host_id))?;
        host.next_book = Some(book_id);
        Ok(())
    }

    /// Replace the rotation queue.
    ///
    /// Every id must be a registered host; otherwise the queue is left as it
    /// was. `start_queue_index` is kept as is; see [`Club::host_index_for`].
    pub fn set_queue(&mut self, ids: Vec<ParticipantId>) -> DomainResult<()> {
        if let Some(unknown) = ids.iter().find(|id| self.host(**id).is_none()) {
            return Err(DomainError::InvalidReference(*unknown));
        }
        self.queue = ids;
        Ok(())
    }

    /// Make the first queue position holding `id` the rotation's month-zero host.
    pub fn set_start_host(&mut self, id: ParticipantId) -> DomainResult<()> {
        let pos = self
            .queue
            .iter()
            .position(|q| *q == id)
            .ok_or(DomainError::NotFound(Missing::QueueMember(id)))?;
        self.start_queue_index = pos;
        Ok(())
    }

    /// Queue position hosting the session on `date`.
    ///
    /// The result is always a valid index into the current queue, even when
    /// `start_queue_index` was set against a longer queue.
    pub fn host_index_for(&self, date: NaiveDate) -> DomainResult<usize> {
        let distance = month_distance(self.anchor_time, date);
        host_index(distance, self.start_queue_index, self.queue.len())
            .ok_or(DomainError::EmptyQueue)
    }
}

impl AggregateRoot for Club {
    type Id = CommunityKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }

    fn version(&self) -> u64 {
        self.version
    }
}
