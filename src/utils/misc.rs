use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::time::{SystemTime, UNIX_EPOCH};

use super::DateParseError;
use crate::constants::*;

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Parse a loan return date. The API always sends UTC with six fractional digits,
/// anything else is treated as bad data.
pub fn parse_return_date(value: &str) -> Result<DateTime<Utc>, DateParseError> {
    let naive =
        NaiveDateTime::parse_from_str(value, RETURN_DATE_FORMAT).map_err(|source| {
            DateParseError {
                value: value.to_owned(),
                source,
            }
        })?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Fractional number of days from `now` until `date`, negative when `date` has passed
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (date - now).num_milliseconds() as f64;
    millis / (24.0 * 3600.0 * 1000.0)
}

/// Render a date the way borrowers read it (day/month/year)
pub fn format_due_date(date: DateTime<Utc>) -> String {
    date.format(DUE_DATE_DISPLAY_FORMAT).to_string()
}

/// Deserialize helper treating an explicit `null` like a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let val = Option::<T>::deserialize(deserializer)?;
    Ok(val.unwrap_or_default())
}
