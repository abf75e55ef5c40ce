//! Points in time and half-open time ranges.
//!
//! [`Time`] is the ordering key of an event that happened at one instant;
//! [`TimeRange`] is a closed-open interval `[begin, end)` used both as an event
//! key and as the resolved extent of a window [`Index`](crate::Index).
//!
//! All timestamps are milliseconds since the UNIX epoch (UTC).

use crate::error::{Error, Result};
use crate::period::Period;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds since UNIX epoch (UTC).
pub type TimestampMs = i64;

/// How a range of a given width is placed around a single timestamp.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// The timestamp opens the range: `[t, t + d)`.
    #[default]
    Begin,
    /// The timestamp sits in the middle: `[t - round(d/2), t + d - round(d/2))`.
    Middle,
    /// The timestamp closes the range: `[t - d, t)`.
    End,
}

/// An immutable instant, usable as an event key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(TimestampMs);

impl Time {
    #[inline]
    #[must_use]
    pub const fn new(ts: TimestampMs) -> Self {
        Self(ts)
    }

    /// The current wall-clock instant.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    #[inline]
    #[must_use]
    pub const fn timestamp(&self) -> TimestampMs {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> TimestampMs {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> TimestampMs {
        self.0
    }

    /// Expand this instant into a range `duration` wide, positioned per `alignment`.
    ///
    /// ```
    /// use ironpond::{Alignment, Period, Time, TimeRange};
    ///
    /// let t = Time::new(100);
    /// let d = Period::from_millis(10).unwrap();
    /// assert_eq!(t.to_time_range(d, Alignment::Begin), TimeRange::new(100, 110));
    /// assert_eq!(t.to_time_range(d, Alignment::Middle), TimeRange::new(95, 105));
    /// assert_eq!(t.to_time_range(d, Alignment::End), TimeRange::new(90, 100));
    /// ```
    #[must_use]
    pub fn to_time_range(&self, duration: Period, alignment: Alignment) -> TimeRange {
        let t = self.0;
        let d = duration.as_millis();
        match alignment {
            Alignment::Begin => TimeRange::new(t, t.saturating_add(d)),
            Alignment::Middle => {
                // d > 0, so (d + 1) / 2 is d/2 rounded half away from zero.
                let half = d / 2 + d % 2;
                let begin = t.saturating_sub(half);
                TimeRange::new(begin, begin.saturating_add(d))
            }
            Alignment::End => TimeRange::new(t.saturating_sub(d), t),
        }
    }

    /// Convert to a UTC date-time, if the timestamp is representable.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::now()
    }
}

impl From<TimestampMs> for Time {
    fn from(ts: TimestampMs) -> Self {
        Self(ts)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

impl FromStr for Time {
    type Err = Error;

    /// Accepts integer epoch milliseconds, RFC 3339 (`2015-04-22T03:30:00Z`),
    /// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD`. Naive
    /// forms are read as UTC.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if let Ok(ms) = text.parse::<i64>() {
            return Ok(Self(ms));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self(dt.timestamp_millis()));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Self(naive.and_utc().timestamp_millis()));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return Ok(Self(midnight.and_utc().timestamp_millis()));
        }
        Err(Error::parse(s, "not epoch milliseconds or a recognised date format"))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A closed-open time range: `[begin, end)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(TimestampMs, TimestampMs)", into = "(TimestampMs, TimestampMs)")]
pub struct TimeRange {
    begin: TimestampMs,
    end: TimestampMs,
}

impl TimeRange {
    /// Build a range; the bounds are swapped if given in reverse.
    #[inline]
    #[must_use]
    pub fn new(begin: TimestampMs, end: TimestampMs) -> Self {
        if end < begin {
            Self { begin: end, end: begin }
        } else {
            Self { begin, end }
        }
    }

    #[inline]
    #[must_use]
    pub const fn begin(&self) -> TimestampMs {
        self.begin
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> TimestampMs {
        self.end
    }

    #[inline]
    #[must_use]
    pub const fn duration(&self) -> i64 {
        self.end - self.begin
    }

    /// True when `ts` lies in `[begin, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(&self, ts: TimestampMs) -> bool {
        self.begin <= ts && ts < self.end
    }

    /// True when `other` lies entirely inside this range.
    #[must_use]
    pub const fn contains_range(&self, other: &Self) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    #[must_use]
    pub const fn disjoint(&self, other: &Self) -> bool {
        !self.overlaps(other)
    }

    /// The overlap of two ranges, or `None` when they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.overlaps(other)
            .then(|| Self::new(self.begin.max(other.begin), self.end.min(other.end)))
    }

    /// The smallest range covering both.
    #[must_use]
    pub fn extents(&self, other: &Self) -> Self {
        Self::new(self.begin.min(other.begin), self.end.max(other.end))
    }
}

impl From<(TimestampMs, TimestampMs)> for TimeRange {
    fn from((begin, end): (TimestampMs, TimestampMs)) -> Self {
        Self::new(begin, end)
    }
}

impl From<TimeRange> for (TimestampMs, TimestampMs) {
    fn from(r: TimeRange) -> Self {
        (r.begin, r.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}
