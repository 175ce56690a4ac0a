//! Plain-text rendering of replies and errors for chat transports.

use core::fmt;

use bookclub_core::{DomainError, Missing};
use bookclub_infra::StoreError;

use crate::handler::{CommandError, Reply};
use crate::parse::{COMMANDS, ParseError};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Greeting => {
                write!(f, "Hi! I am the book club bot. Send /help to see what I can do.")
            }
            Reply::Help => {
                write!(f, "Available commands:")?;
                for (_, usage) in COMMANDS {
                    write!(f, "\n{usage}")?;
                }
                Ok(())
            }
            Reply::Done => write!(f, "Done!"),
            Reply::BookAdded(book) => write!(f, "Added {} - {}.", book.author, book.title),
            Reply::Session(session) => {
                if session.number == 1 {
                    write!(f, "Next club session: ")?;
                } else {
                    write!(f, "Club session #{}: ", session.number)?;
                }
                write!(f, "{}", session.date.format(DATE_FORMAT))?;
                match &session.host {
                    Some(host) => write!(f, ", host: {}", host.name)?,
                    None => write!(f, ", host: removed participant {}", session.participant)?,
                }
                if let Some(book) = &session.next_book {
                    write!(f, ", book: {} - {}", book.author, book.title)?;
                }
                write!(f, ".")
            }
            Reply::Hosts(hosts) => {
                write!(f, "Participants:")?;
                for (i, host) in hosts.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, host.name)?;
                }
                Ok(())
            }
            Reply::Books(books) => {
                write!(f, "Books:")?;
                for (i, book) in books.iter().enumerate() {
                    write!(f, "\n{}. {} - {}", i + 1, book.author, book.title)?;
                }
                Ok(())
            }
            Reply::Queue(entries) => {
                write!(f, "Host queue:")?;
                if entries.is_empty() {
                    return write!(f, " (empty)");
                }
                for entry in entries {
                    match &entry.host {
                        Some(host) => write!(f, "\n{}", host.name)?,
                        None => write!(f, "\n(removed participant {})", entry.participant)?,
                    }
                    if entry.is_start {
                        write!(f, " (start)")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// User-facing text for a failed command.
pub fn render_error(error: &CommandError) -> String {
    match error {
        CommandError::Parse(ParseError::NotACommand) => {
            "Commands start with '/'. Send /help for the list.".to_string()
        }
        CommandError::Parse(ParseError::Unknown(name)) => {
            format!("I don't know /{name}. Send /help for the list.")
        }
        CommandError::Parse(ParseError::BadArguments { usage }) => {
            format!("Wrong format. Usage: {usage}")
        }
        CommandError::NoSuchHostNumber(n) => {
            format!("There is no participant number {n}. See /list_hosts.")
        }
        CommandError::NoSuchBookNumber(n) => {
            format!("There is no book number {n}. See /list_books.")
        }
        CommandError::Domain(e) => match e {
            DomainError::AlreadyExists(_) => "You are already registered.".to_string(),
            DomainError::NotFound(Missing::Host(_)) => {
                "Participant not found. Use /register first.".to_string()
            }
            DomainError::NotFound(Missing::Book(_)) => "Book not found.".to_string(),
            DomainError::NotFound(Missing::QueueMember(_)) => {
                "That participant is not in the queue. See /get_queue.".to_string()
            }
            DomainError::InvalidReference(_) => {
                "One or more participants were not found.".to_string()
            }
            DomainError::EmptyQueue => "Nobody has been added to the host queue yet.".to_string(),
            DomainError::Validation(msg) => format!("Invalid request: {msg}."),
            DomainError::OutOfRange => "That session is too far in the future.".to_string(),
        },
        CommandError::Store(StoreError::Concurrency { .. }) => {
            "Someone else changed the club at the same time. Please try again.".to_string()
        }
        CommandError::Store(_) => "Could not save. Please try again later.".to_string(),
    }
}
