//! Club domain module (hosts, books, rotation queue, session resolution).
//!
//! This crate contains the rules for one reading club, implemented purely as
//! deterministic domain logic (no IO, no clock, no storage).

pub mod club;
pub mod session;

pub use club::{Book, Club, Host};
pub use session::{Session, get_nth_session, nth_anchor_date};
