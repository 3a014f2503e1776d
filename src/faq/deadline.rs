//! Compliance deadline countdown and placeholder substitution.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Token replaced with the remaining day count.
pub const DEADLINE_PLACEHOLDER: &str = "{days_until_deadline}";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The compliance deadline: 2026-04-24.
pub fn compliance_deadline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 24).unwrap_or_default()
}

/// Whole days from `now` until local midnight of `deadline`, never negative.
pub fn days_until_deadline(now: NaiveDateTime, deadline: NaiveDate) -> i64 {
    let target = deadline.and_time(NaiveTime::MIN);
    let millis = (target - now).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY).max(0)
}

/// Replace every `placeholder` in `text` with `days`.
///
/// Returns `None` when the text has no placeholder.
pub fn substitute_placeholder(text: &str, placeholder: &str, days: i64) -> Option<String> {
    if placeholder.is_empty() || !text.contains(placeholder) {
        return None;
    }
    Some(text.replace(placeholder, &days.to_string()))
}
