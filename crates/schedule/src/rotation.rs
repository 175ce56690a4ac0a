//! Month-based rotation: which queue position hosts a given anchor date.

use chrono::Datelike;

/// Whole calendar months from `from` to `to`, ignoring day and time.
///
/// Negative when `to` lies in an earlier month than `from`.
pub fn month_distance(from: impl Datelike, to: impl Datelike) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

/// Queue position for a session `distance` months after the rotation epoch.
///
/// Uses a floored modulo, so the result lies in `0..queue_len` for any sign of
/// `distance` and any `start` offset. Returns `None` for an empty queue.
pub fn host_index(distance: i64, start: usize, queue_len: usize) -> Option<usize> {
    if queue_len == 0 {
        return None;
    }
    let shifted = i128::from(distance) + start as i128;
    let index = shifted.rem_euclid(queue_len as i128);
    usize::try_from(index).ok()
}
