//! Session resolution: which date and which host correspond to the N-th
//! upcoming meeting.
//!
//! Hosts rotate by calendar month rather than by meetings held, so asking for
//! the 3rd session directly gives the same answer as stepping through the
//! 1st and 2nd.

use chrono::NaiveDate;

use bookclub_core::{DomainError, DomainResult, ParticipantId};
use bookclub_schedule::next_anchor_on_or_after;

use crate::club::{Book, Club, Host};

/// A resolved (date, host) pair for a future meeting. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// 1-based position among upcoming sessions.
    pub number: u32,
    pub date: NaiveDate,
    /// Queue entry hosting this session.
    pub participant: ParticipantId,
    /// `None` when the queued participant has since been removed.
    pub host: Option<Host>,
    /// The host's planned book, when set and still present.
    pub next_book: Option<Book>,
}

/// The `n`-th anchor day on or after `now` (`n` starts at 1).
///
/// Returns `None` for `n == 0` or when the search leaves the representable
/// calendar.
pub fn nth_anchor_date(n: u32, now: NaiveDate) -> Option<NaiveDate> {
    let mut cursor = now;
    let mut found = None;
    for _ in 0..n {
        let anchor = next_anchor_on_or_after(cursor)?;
        found = Some(anchor);
        cursor = anchor.succ_opt()?;
    }
    found
}

/// Resolve the `n`-th upcoming session of `club` relative to `now`.
///
/// Read-only: the host's next book is reported, not consumed.
pub fn get_nth_session(n: u32, club: &Club, now: NaiveDate) -> DomainResult<Session> {
    if club.queue().is_empty() {
        return Err(DomainError::EmptyQueue);
    }
    if n == 0 {
        return Err(DomainError::validation("session number must be at least 1"));
    }

    let date = nth_anchor_date(n, now).ok_or(DomainError::OutOfRange)?;
    let index = club.host_index_for(date)?;
    let participant = club.queue()[index];
    let host = club.host(participant).cloned();
    let next_book = host
        .as_ref()
        .and_then(|h| club.next_book_of(h))
        .cloned();

    Ok(Session {
        number: n,
        date,
        participant,
        host,
        next_book,
    })
}
