//! Date-unit parsing for temporal axes.
//!
//! Temporal netCDF axes carry unit strings of the form
//! `"<unit> since <epoch>"`, e.g. `"hours since 1992-10-08 15:15:42"` or
//! `"days since 1970-01-01"`. The parsed [`DateUnit`] supplies the temporal
//! datum origin and the tick length used to interpret axis values.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing a date-unit expression.
#[derive(Debug, Error)]
pub enum DateUnitError {
    /// The string is not of the form `"<unit> since <epoch>"`.
    #[error("not a date-unit expression: {0:?}")]
    InvalidFormat(String),

    /// The unit token before `since` is not a known time unit.
    #[error("unknown time unit: {0:?}")]
    UnknownUnit(String),

    /// The epoch after `since` could not be parsed as a date.
    #[error("invalid epoch: {0:?}")]
    InvalidEpoch(String),
}

/// Calendar tick unit of a temporal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Tick length in SI seconds.
    ///
    /// Months and years use the udunits conventions: the year is the
    /// tropical year, a month is one twelfth of it.
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Days => 86_400.0,
            TimeUnit::Weeks => 604_800.0,
            TimeUnit::Months => 3.155_692_597_47e7 / 12.0,
            TimeUnit::Years => 3.155_692_597_47e7,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(TimeUnit::Seconds),
            "min" | "mins" | "minute" | "minutes" => Some(TimeUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(TimeUnit::Hours),
            "d" | "day" | "days" => Some(TimeUnit::Days),
            "week" | "weeks" => Some(TimeUnit::Weeks),
            "mon" | "month" | "months" => Some(TimeUnit::Months),
            "yr" | "yrs" | "year" | "years" => Some(TimeUnit::Years),
            _ => None,
        }
    }
}

/// A parsed `"<factor> <unit> since <epoch>"` expression.
///
/// The numeric factor is optional and defaults to 1, so `"3 hours since
/// 2024-01-01"` describes an axis ticking in three-hour steps.
#[derive(Debug, Clone, PartialEq)]
pub struct DateUnit {
    unit: TimeUnit,
    factor: f64,
    origin: DateTime<Utc>,
}

impl DateUnit {
    /// Parse a date-unit expression.
    pub fn parse(s: &str) -> Result<Self, DateUnitError> {
        let lowered = s.to_ascii_lowercase();
        let idx = lowered
            .find(" since ")
            .ok_or_else(|| DateUnitError::InvalidFormat(s.to_string()))?;
        let head = s[..idx].trim();
        let epoch = s[idx + " since ".len()..].trim();

        let tokens: Vec<&str> = head.split_whitespace().collect();
        let (factor, unit_token) = match tokens.as_slice() {
            [unit] => (1.0, *unit),
            [factor, unit] => {
                let factor: f64 = factor
                    .parse()
                    .map_err(|_| DateUnitError::InvalidFormat(s.to_string()))?;
                (factor, *unit)
            }
            _ => return Err(DateUnitError::InvalidFormat(s.to_string())),
        };
        if !(factor.is_finite() && factor > 0.0) {
            return Err(DateUnitError::InvalidFormat(s.to_string()));
        }
        let unit = TimeUnit::parse(unit_token)
            .ok_or_else(|| DateUnitError::UnknownUnit(unit_token.to_string()))?;
        let origin = parse_epoch(epoch)?;
        Ok(Self {
            unit,
            factor,
            origin,
        })
    }

    /// The calendar tick unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The date and time origin of the temporal datum.
    pub fn origin(&self) -> DateTime<Utc> {
        self.origin
    }

    /// Length of one axis tick in SI seconds (factor applied).
    pub fn seconds_per_tick(&self) -> f64 {
        self.factor * self.unit.seconds()
    }

    /// The absolute instant of an axis coordinate value.
    pub fn instant(&self, value: f64) -> DateTime<Utc> {
        let micros = value * self.seconds_per_tick() * 1e6;
        self.origin + Duration::microseconds(micros as i64)
    }
}

/// Parse an epoch string.
///
/// Accepts RFC 3339, `"YYYY-MM-DD HH:MM:SS[.fff]"` with `T` or space
/// separator, bare dates, and the udunits trailing zone forms
/// (`Z`, `UTC`, `±H`, `±HH:MM`, `±HHMM`). Non-padded month/day/hour fields
/// are tolerated, as they appear in the wild.
fn parse_epoch(s: &str) -> Result<DateTime<Utc>, DateUnitError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Normalize the separator, then split into date / time / zone fields.
    let normalized = s.replacen('T', " ", 1);
    let mut fields = normalized.split_whitespace();
    let date_field = fields
        .next()
        .ok_or_else(|| DateUnitError::InvalidEpoch(s.to_string()))?;
    let time_field = fields.next();
    let zone_field = fields.next();
    if fields.next().is_some() {
        return Err(DateUnitError::InvalidEpoch(s.to_string()));
    }

    let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d")
        .map_err(|_| DateUnitError::InvalidEpoch(s.to_string()))?;

    let (time, zone_from_time) = match time_field {
        None => (NaiveTime::default(), None),
        Some(t) => {
            // A trailing Z may be glued onto the time field.
            let (stripped, glued_zone) = match t.strip_suffix('Z').or_else(|| t.strip_suffix('z')) {
                Some(stripped) => (stripped, Some("Z")),
                None => (t, None),
            };
            match parse_time(stripped) {
                Some(time) => (time, glued_zone),
                // A bare zone after the date, e.g. "1970-01-01 UTC".
                None if zone_field.is_none() && parse_zone(t).is_some() => {
                    (NaiveTime::default(), Some(t))
                }
                None => return Err(DateUnitError::InvalidEpoch(s.to_string())),
            }
        }
    };

    let offset_minutes = match zone_from_time.or(zone_field) {
        None => 0,
        Some(z) => parse_zone(z).ok_or_else(|| DateUnitError::InvalidEpoch(s.to_string()))?,
    };

    let naive = NaiveDateTime::new(date, time);
    Ok(Utc.from_utc_datetime(&naive) - Duration::minutes(offset_minutes))
}

fn parse_time(t: &str) -> Option<NaiveTime> {
    for format in ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(t, format) {
            return Some(time);
        }
    }
    None
}

/// Parse a udunits zone suffix into an offset east of Greenwich, in minutes.
fn parse_zone(z: &str) -> Option<i64> {
    match z {
        "Z" | "z" | "UTC" | "utc" | "GMT" | "gmt" => return Some(0),
        _ => {}
    }
    let (sign, digits) = if let Some(rest) = z.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = z.strip_prefix('-') {
        (-1, rest)
    } else {
        (1, z)
    };
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<i64>().ok()?, m.parse::<i64>().ok()?),
        None if digits.len() > 2 => {
            // Compact HHMM form.
            let (h, m) = digits.split_at(digits.len() - 2);
            (h.parse::<i64>().ok()?, m.parse::<i64>().ok()?)
        }
        None => (digits.parse::<i64>().ok()?, 0),
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}
