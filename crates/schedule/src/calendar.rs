//! Anchor days: the second Tuesday of each month.

use chrono::{Datelike, NaiveDate, Weekday};

/// Upper bound on days scanned before an anchor day is found.
///
/// No date is more than 34 days before the next second Tuesday (the day after
/// an anchor on the 8th, followed by a month whose anchor falls on the 12th-14th).
pub const MAX_ANCHOR_SCAN_DAYS: usize = 35;

/// Whether `date` is a rotation anchor day (a Tuesday on day 8..=14).
pub fn is_anchor_day(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Tue && (8..=14).contains(&date.day())
}

/// The first anchor day on or after `date`.
///
/// Returns `None` only when the scan runs past the last date chrono can
/// represent.
pub fn next_anchor_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    date.iter_days()
        .take(MAX_ANCHOR_SCAN_DAYS)
        .find(|d| is_anchor_day(*d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn second_tuesday_is_an_anchor() {
        assert!(is_anchor_day(d(2024, 11, 12)));
        assert!(is_anchor_day(d(2024, 12, 10)));
        assert!(is_anchor_day(d(2025, 4, 8)));
        assert!(is_anchor_day(d(2025, 10, 14)));
    }

    #[test]
    fn other_tuesdays_are_not_anchors() {
        assert!(!is_anchor_day(d(2024, 11, 5)));
        assert!(!is_anchor_day(d(2024, 11, 19)));
        assert!(!is_anchor_day(d(2025, 4, 1)));
        assert!(!is_anchor_day(d(2025, 10, 7)));
    }

    #[test]
    fn non_tuesdays_in_range_are_not_anchors() {
        assert!(!is_anchor_day(d(2024, 11, 13)));
        assert!(!is_anchor_day(d(2024, 11, 8)));
    }

    #[test]
    fn next_anchor_scans_forward() {
        assert_eq!(next_anchor_on_or_after(d(2024, 11, 1)), Some(d(2024, 11, 12)));
        assert_eq!(next_anchor_on_or_after(d(2024, 11, 13)), Some(d(2024, 12, 10)));
        assert_eq!(next_anchor_on_or_after(d(2024, 12, 31)), Some(d(2025, 1, 14)));
    }

    #[test]
    fn next_anchor_is_identity_on_anchor_days() {
        assert_eq!(next_anchor_on_or_after(d(2024, 11, 12)), Some(d(2024, 11, 12)));
    }

    #[test]
    fn next_anchor_bridges_the_longest_gap() {
        // 2024-10-08 is the earliest possible second Tuesday and 2024-11-12 the
        // latest, so the day after the former is 34 days from the next anchor.
        assert_eq!(next_anchor_on_or_after(d(2024, 10, 9)), Some(d(2024, 11, 12)));
        assert_eq!(
            (d(2024, 11, 12) - d(2024, 10, 9)).num_days() + 1,
            MAX_ANCHOR_SCAN_DAYS as i64
        );
    }

    #[test]
    fn next_anchor_is_none_at_the_end_of_the_calendar() {
        assert_eq!(next_anchor_on_or_after(NaiveDate::MAX), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_date() -> impl Strategy<Value = NaiveDate> {
            (1900i32..2200, 1u32..=12, 1u32..=31).prop_filter_map("valid date", |(y, m, day)| {
                NaiveDate::from_ymd_opt(y, m, day)
            })
        }

        proptest! {
            /// Property: the predicate is exactly "Tuesday with day-of-month in 8..=14".
            #[test]
            fn predicate_matches_definition(date in any_date()) {
                let expected = date.weekday() == Weekday::Tue && date.day() > 7 && date.day() < 15;
                prop_assert_eq!(is_anchor_day(date), expected);
            }

            /// Property: every month has exactly one anchor day.
            #[test]
            fn exactly_one_anchor_per_month(year in 1900i32..2200, month in 1u32..=12) {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let count = first
                    .iter_days()
                    .take_while(|d| d.month() == month)
                    .filter(|d| is_anchor_day(*d))
                    .count();
                prop_assert_eq!(count, 1);
            }

            /// Property: the result is an anchor, not before the input, and no
            /// day in between is one.
            #[test]
            fn next_anchor_is_the_first_one(date in any_date()) {
                let anchor = next_anchor_on_or_after(date).unwrap();
                prop_assert!(is_anchor_day(anchor));
                prop_assert!(anchor >= date);
                prop_assert!(
                    date.iter_days()
                        .take_while(|d| *d < anchor)
                        .all(|d| !is_anchor_day(d))
                );
                prop_assert_eq!(next_anchor_on_or_after(anchor), Some(anchor));
            }
        }
    }
}
