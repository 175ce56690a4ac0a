//! Scheduling rules for the club rotation.
//!
//! Pure calendar arithmetic (no IO, no clock). Callers supply every date.

pub mod calendar;
pub mod rotation;

pub use calendar::{MAX_ANCHOR_SCAN_DAYS, is_anchor_day, next_anchor_on_or_after};
pub use rotation::{host_index, month_distance};
