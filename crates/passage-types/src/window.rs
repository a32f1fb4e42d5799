//! Temporal window values.
//!
//! Two interval types with different clocks:
//! - [`TimeWindow`]: a wall-clock interval that may cross midnight
//!   (`22:00–02:00` is valid and means "evening into the next morning").
//! - [`ValidityWindow`]: an inclusive calendar-date interval with ordered
//!   bounds.
//!
//! Construction validates; `contains`/`overlaps`/`duration` are total.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest year accepted in a [`ValidityWindow`].
pub const MIN_VALIDITY_YEAR: i32 = 1900;

/// Latest year accepted in a [`ValidityWindow`].
pub const MAX_VALIDITY_YEAR: i32 = 2100;

/// Error type for malformed window construction inputs.
///
/// These are caller bugs (bad admin input reaching the core), not runtime
/// conditions: a window that constructs successfully can never fail later.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// A time-of-day string did not parse as `HH:MM`.
    #[error("invalid time for {field}: {value:?} (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    /// A date string did not parse as `YYYY-MM-DD`.
    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    /// The start date is after the end date.
    #[error("start_date {start} is after end_date {end}")]
    InvertedDates { start: NaiveDate, end: NaiveDate },

    /// A date falls outside the supported calendar range.
    #[error("{field} {value} is outside the supported range {MIN_VALIDITY_YEAR}-{MAX_VALIDITY_YEAR}")]
    DateOutOfRange { field: &'static str, value: NaiveDate },
}

// ============================================================================
// TimeWindow
// ============================================================================

/// A wall-clock interval on a 24-hour clock.
///
/// There is deliberately no ordering constraint between `start` and `end`:
/// `end < start` is a valid, meaningful state in which the window crosses
/// midnight. A night-shift window of `22:00–02:00` contains `23:30` and
/// `01:00` but not `12:00`.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    /// Creates a window from two times of day.
    ///
    /// Every pair is valid; `end < start` means the window wraps past
    /// midnight.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parses a window from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidTime`] naming the offending field when
    /// either string does not parse.
    pub fn parse(start: &str, end: &str) -> Result<Self, WindowError> {
        let start = parse_time("start", start)?;
        let end = parse_time("end", end)?;
        Ok(Self::new(start, end))
    }

    /// The inclusive start of the window.
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// The inclusive end of the window.
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns true when the window crosses midnight (`end < start`).
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Returns true when `t` falls within the window, bounds inclusive.
    ///
    /// Total: every time of day is comparable, so there is no error path.
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.crosses_midnight() {
            t >= self.start || t <= self.end
        } else {
            self.start <= t && t <= self.end
        }
    }

    /// The length of the window.
    ///
    /// For a wrapping window this is `24h − (start − end)`, so `22:00–02:00`
    /// has a duration of four hours.
    pub fn duration(&self) -> Duration {
        if self.crosses_midnight() {
            Duration::hours(24) - (self.start - self.end)
        } else {
            self.end - self.start
        }
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, WindowError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| WindowError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

// ============================================================================
// ValidityWindow
// ============================================================================

/// An inclusive calendar-date interval.
///
/// Unlike [`TimeWindow`], the bounds are ordered: `start_date <= end_date`
/// is enforced at construction, as is a sane calendar range
/// ([`MIN_VALIDITY_YEAR`]–[`MAX_VALIDITY_YEAR`]). Leap years are handled by
/// the underlying date type, not by custom arithmetic.
///
/// Deserialization routes through [`ValidityWindow::new`], so the ordering
/// and range invariants hold on every construction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawValidityWindow")]
pub struct ValidityWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Unvalidated wire form of [`ValidityWindow`].
#[derive(Deserialize)]
struct RawValidityWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<RawValidityWindow> for ValidityWindow {
    type Error = WindowError;

    fn try_from(raw: RawValidityWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start_date, raw.end_date)
    }
}

impl ValidityWindow {
    /// Creates a window from two calendar dates.
    ///
    /// # Errors
    ///
    /// - [`WindowError::InvertedDates`] when `start_date > end_date`
    /// - [`WindowError::DateOutOfRange`] when either date falls outside the
    ///   supported calendar range
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, WindowError> {
        check_range("start_date", start_date)?;
        check_range("end_date", end_date)?;
        if start_date > end_date {
            return Err(WindowError::InvertedDates {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Parses a window from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidDate`] naming the offending field when
    /// either string does not parse, plus the construction errors of
    /// [`ValidityWindow::new`].
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, WindowError> {
        let start = parse_date("start_date", start_date)?;
        let end = parse_date("end_date", end_date)?;
        Self::new(start, end)
    }

    /// The inclusive first day of the window.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The inclusive last day of the window.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns true when `date` falls within the window, bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true when the two windows share at least one day.
    ///
    /// Symmetric: `a.overlaps(b) == b.overlaps(a)` for all windows.
    pub fn overlaps(&self, other: &ValidityWindow) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }
}

fn check_range(field: &'static str, value: NaiveDate) -> Result<(), WindowError> {
    use chrono::Datelike;
    if value.year() < MIN_VALIDITY_YEAR || value.year() > MAX_VALIDITY_YEAR {
        return Err(WindowError::DateOutOfRange { field, value });
    }
    Ok(())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, WindowError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| WindowError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
