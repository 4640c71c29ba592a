// Range filter - Trims the full series to the selected lookback window
use crate::domain::range::RangeToken;
use crate::domain::rates::Series;
use chrono::{DateTime, TimeZone};

/// Samples of `full` at or after the window start for `token`, relative to `now`
pub fn filter<Tz: TimeZone>(full: &Series, token: RangeToken, now: &DateTime<Tz>) -> Series {
    match token.start_date(now) {
        Some(start) => full.since(start),
        None => full.clone(),
    }
}
