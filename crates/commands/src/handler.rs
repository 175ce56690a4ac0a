//! Per-command execution against the club service.

use chrono::{DateTime, Utc};
use thiserror::Error;

use bookclub_club::{Book, Club, Host, Session, get_nth_session};
use bookclub_core::{BookId, CommunityKey, DomainError, ParticipantId};
use bookclub_infra::{ClubService, ClubStore, ServiceError, StoreError};

use crate::parse::{ClubCommand, ParseError};

/// One inbound command as delivered by a chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub community: CommunityKey,
    pub sender: ParticipantId,
    pub sender_name: String,
    pub text: String,
}

/// One row of the host queue, as shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub participant: ParticipantId,
    /// `None` when the participant has been removed since the queue was set.
    pub host: Option<Host>,
    /// Whether this row is the rotation's month-zero host.
    pub is_start: bool,
}

/// Result of a command, for the transport to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Greeting,
    Help,
    Done,
    BookAdded(Book),
    Session(Session),
    Hosts(Vec<Host>),
    Books(Vec<Book>),
    Queue(Vec<QueueEntry>),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("there is no participant number {0}")]
    NoSuchHostNumber(usize),

    #[error("there is no book number {0}")]
    NoSuchBookNumber(usize),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ServiceError> for CommandError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Domain(e) => CommandError::Domain(e),
            ServiceError::Store(e) => CommandError::Store(e),
        }
    }
}

fn host_at(club: &Club, position: usize) -> Result<ParticipantId, CommandError> {
    position
        .checked_sub(1)
        .and_then(|i| club.hosts().get(i))
        .map(|h| h.id)
        .ok_or(CommandError::NoSuchHostNumber(position))
}

fn book_at(club: &Club, position: usize) -> Result<BookId, CommandError> {
    position
        .checked_sub(1)
        .and_then(|i| club.books().get(i))
        .map(|b| b.id)
        .ok_or(CommandError::NoSuchBookNumber(position))
}

fn queue_entries(club: &Club) -> Vec<QueueEntry> {
    let len = club.queue().len();
    club.queue()
        .iter()
        .enumerate()
        .map(|(i, id)| QueueEntry {
            participant: *id,
            host: club.host(*id).cloned(),
            is_start: i == club.start_queue_index() % len,
        })
        .collect()
}

/// Executes parsed commands for any number of communities.
///
/// Each call loads the addressed community's club, applies one operation and
/// stores the result; there is no state shared between communities.
#[derive(Debug)]
pub struct CommandHandler<S> {
    service: ClubService<S>,
}

impl<S> CommandHandler<S> {
    pub fn new(service: ClubService<S>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ClubService<S> {
        &self.service
    }
}

impl<S> CommandHandler<S>
where
    S: ClubStore,
{
    /// Parse and execute `request.text`.
    pub fn handle(
        &self,
        request: &CommandRequest,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let command: ClubCommand = request.text.parse()?;
        tracing::info!(
            "community {}: {:?} from participant {}",
            request.community,
            command,
            request.sender
        );

        let result = self.dispatch(request, command, now);
        if let Err(e) = &result {
            tracing::warn!("community {}: command rejected: {}", request.community, e);
        }
        result
    }

    /// Execute an already parsed command.
    pub fn dispatch(
        &self,
        request: &CommandRequest,
        command: ClubCommand,
        now: DateTime<Utc>,
    ) -> Result<Reply, CommandError> {
        let key = request.community;
        let sender = request.sender;

        match command {
            ClubCommand::Help => Ok(Reply::Help),
            ClubCommand::Start => {
                self.service.load_or_create(key, now)?;
                Ok(Reply::Greeting)
            }
            ClubCommand::Next(n) => {
                let session = self
                    .service
                    .query(key, now, |club| get_nth_session(n, club, now.date_naive()))?;
                Ok(Reply::Session(session))
            }
            ClubCommand::Register => {
                let name = request.sender_name.clone();
                self.service.execute(key, now, |club| club.add_host(sender, name))?;
                Ok(Reply::Done)
            }
            ClubCommand::Deregister => {
                self.service.execute(key, now, |club| club.remove_host(sender))?;
                Ok(Reply::Done)
            }
            ClubCommand::AddBook { author, title } => {
                let book = self.service.execute(key, now, |club| {
                    let id = club.add_book(author, title);
                    club.book(id).cloned().ok_or(DomainError::book_not_found(id))
                })?;
                Ok(Reply::BookAdded(book))
            }
            ClubCommand::ListHosts => {
                let hosts = self.service.query(key, now, |club| Ok(club.hosts().to_vec()))?;
                Ok(Reply::Hosts(hosts))
            }
            ClubCommand::ListBooks => {
                let books = self.service.query(key, now, |club| Ok(club.books().to_vec()))?;
                Ok(Reply::Books(books))
            }
            ClubCommand::DeleteBook(position) => {
                self.service.execute_with(key, now, |club| {
                    let id = book_at(club, position)?;
                    club.delete_book(id)?;
                    Ok::<_, CommandError>(())
                })?;
                Ok(Reply::Done)
            }
            ClubCommand::MyNextBook(position) => {
                self.service.execute_with(key, now, |club| {
                    let id = book_at(club, position)?;
                    club.set_next_book(sender, id)?;
                    Ok::<_, CommandError>(())
                })?;
                Ok(Reply::Done)
            }
            ClubCommand::SetQueue(positions) => {
                self.service.execute_with(key, now, |club| {
                    let ids = positions
                        .iter()
                        .map(|p| host_at(club, *p))
                        .collect::<Result<Vec<_>, _>>()?;
                    club.set_queue(ids)?;
                    Ok::<_, CommandError>(())
                })?;
                Ok(Reply::Done)
            }
            ClubCommand::GetQueue => {
                let entries = self.service.query(key, now, |club| Ok(queue_entries(club)))?;
                Ok(Reply::Queue(entries))
            }
            ClubCommand::SetStart(position) => {
                self.service.execute_with(key, now, |club| {
                    let id = host_at(club, position)?;
                    club.set_start_host(id)?;
                    Ok::<_, CommandError>(())
                })?;
                Ok(Reply::Done)
            }
        }
    }
}
