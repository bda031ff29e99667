//! Duration parsing for configuration values.
//!
//! Accepts ISO-8601 durations (`PT5M`, `P1DT2H`), humantime durations
//! (`5m`, `1h 30m`) and bare integers, which are read as milliseconds.

use crate::utils::error::{LoaderError, Result};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub fn parse_duration(raw: &str) -> Result<Duration> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(invalid(raw, "duration cannot be empty"));
    }

    if value.starts_with(['P', 'p']) {
        return parse_iso8601(raw, &value.to_ascii_uppercase());
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        let millis = value
            .parse::<u64>()
            .map_err(|e| invalid(raw, &e.to_string()))?;
        return Ok(Duration::from_millis(millis));
    }

    humantime::parse_duration(value).map_err(|e| invalid(raw, &e.to_string()))
}

fn parse_iso8601(raw: &str, value: &str) -> Result<Duration> {
    let parsed = iso8601::duration(value).map_err(|e| invalid(raw, &e))?;

    match parsed {
        iso8601::Duration::Weeks(weeks) => Ok(Duration::from_secs(u64::from(weeks) * 7 * 86_400)),
        iso8601::Duration::YMDHMS {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        } => {
            // 年、月長度不固定
            if year != 0 || month != 0 {
                return Err(invalid(raw, "calendar units (years, months) are not supported"));
            }
            let secs = u64::from(day) * 86_400
                + u64::from(hour) * 3_600
                + u64::from(minute) * 60
                + u64::from(second);
            Ok(Duration::from_secs(secs) + Duration::from_millis(u64::from(millisecond)))
        }
    }
}

fn invalid(raw: &str, reason: &str) -> LoaderError {
    LoaderError::InvalidDurationError {
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// serde helper for optional duration fields written as strings.
pub fn deserialize_optional<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}
