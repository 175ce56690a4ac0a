//! Chat command layer for the reading club.
//!
//! Turns raw command text from a chat transport into club operations and
//! returns [`Reply`] values the transport can print. List positions shown to
//! users (1-based) are translated to ids here and nowhere else.

pub mod handler;
pub mod parse;
pub mod render;

pub use handler::{CommandError, CommandHandler, CommandRequest, QueueEntry, Reply};
pub use parse::{ClubCommand, ParseError};
pub use render::render_error;
