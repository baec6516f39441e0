use chrono::{DateTime, Utc};
use mailstats_core::{HOUR_SECONDS, hour_floor, last_complete_hour};

use crate::config::{HourBound, HourRangeParams};
use crate::error::{AppError, Result};

const DEFAULT_RANGE_HOURS: i64 = 24;

/// Start of the last fully elapsed hour.
pub fn current_hour() -> i64 {
    last_complete_hour(Utc::now().timestamp())
}

/// Unix seconds stay as given; RFC 3339 text is floored to its hour.
pub fn parse_hour_bound(bound: &HourBound) -> Result<i64> {
    match bound {
        HourBound::Unix(value) => Ok(*value),
        HourBound::Text(text) => {
            let text = text.trim();
            if let Ok(value) = text.parse::<i64>() {
                return Ok(value);
            }
            let parsed = DateTime::parse_from_rfc3339(text)
                .map_err(|err| AppError::InvalidInput(format!("invalid hour {:?}: {}", text, err)))?;
            Ok(hour_floor(parsed.with_timezone(&Utc).timestamp()))
        }
    }
}

/// Inclusive `(start, end)` hours. A missing end means the last complete
/// hour; a missing start covers the 24 hours ending at `end`.
pub fn resolve_hour_range(params: &HourRangeParams) -> Result<(i64, i64)> {
    let end = match &params.end {
        Some(bound) => parse_hour_bound(bound)?,
        None => current_hour(),
    };
    let start = match &params.start {
        Some(bound) => parse_hour_bound(bound)?,
        None => end
            .checked_sub((DEFAULT_RANGE_HOURS - 1) * HOUR_SECONDS)
            .ok_or_else(|| {
                AppError::InvalidInput(format!("range end {} leaves no room for a default start", end))
            })?,
    };
    if start > end {
        return Err(AppError::InvalidInput(format!(
            "range start {} is after end {}",
            start, end
        )));
    }
    Ok((start, end))
}
