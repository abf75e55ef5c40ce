//! Window indexing: timestamp × period → canonical window label.
//!
//! Windows tumble: the time axis is cut into contiguous, non-overlapping,
//! equal-width intervals aligned to the UNIX epoch. For a period `p` the
//! interval holding `t` starts at `floor(t / p) * p`, including for negative
//! timestamps. An [`Index`] names one such interval as `"<period>-<n>"`, where
//! `n` is the interval number, e.g. `"30m-0"` for `[0, 1_800_000)` and
//! `"1h--1"` for the hour before the epoch.
//!
//! ```
//! use ironpond::{Index, Period, TimeRange};
//!
//! let p = Period::minutes(30).unwrap();
//! let a = Index::of(5 * 60_000, p);
//! let b = Index::of(20 * 60_000, p);
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "30m-0");
//! assert_eq!(a.to_time_range(), TimeRange::new(0, 30 * 60_000));
//! ```

use crate::error::{Error, Result};
use crate::period::Period;
use crate::time::{TimeRange, TimestampMs};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Canonical label of one tumbling window instance.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Index {
    period: Period,
    bucket: i64,
}

impl Index {
    /// The window of width `period` that contains `ts`.
    #[inline]
    #[must_use]
    pub fn of(ts: TimestampMs, period: Period) -> Self {
        Self {
            period,
            bucket: ts.div_euclid(period.as_millis()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Ordinal of this window counted from the epoch (negative before it).
    #[inline]
    #[must_use]
    pub const fn bucket(&self) -> i64 {
        self.bucket
    }

    #[inline]
    #[must_use]
    pub fn begin(&self) -> TimestampMs {
        self.bucket.saturating_mul(self.period.as_millis())
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> TimestampMs {
        self.begin().saturating_add(self.period.as_millis())
    }

    /// The interval this index denotes.
    #[must_use]
    pub fn to_time_range(&self) -> TimeRange {
        TimeRange::new(self.begin(), self.end())
    }

    /// The text label, e.g. `"30m-0"`.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

/// Compute the window index of `ts` for a period given in milliseconds.
///
/// # Errors
/// Returns [`Error::Configuration`] when `period_ms <= 0`.
pub fn index_of(ts: TimestampMs, period_ms: i64) -> Result<Index> {
    Ok(Index::of(ts, Period::from_millis(period_ms)?))
}

// Two indexes are equal iff they name the same interval.
impl PartialEq for Index {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.period == other.period && self.bucket == other.bucket
    }
}
impl Eq for Index {}
impl Hash for Index {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.period.hash(state);
        self.bucket.hash(state);
    }
}
impl Ord for Index {
    #[inline]
    fn cmp(&self, o: &Self) -> Ordering {
        self.begin()
            .cmp(&o.begin())
            .then(self.end().cmp(&o.end()))
            .then(self.period.cmp(&o.period))
            .then(self.bucket.cmp(&o.bucket))
    }
}
impl PartialOrd for Index {
    #[inline]
    fn partial_cmp(&self, o: &Self) -> Option<Ordering> {
        Some(self.cmp(o))
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.period, self.bucket)
    }
}

impl FromStr for Index {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // The period never contains '-', so the first one separates the parts.
        let (period, bucket) = s
            .split_once('-')
            .ok_or_else(|| Error::parse(s, "expected <period>-<n>"))?;
        let period: Period = period
            .parse()
            .map_err(|e: Error| Error::parse(s, e.to_string()))?;
        let bucket: i64 = bucket
            .parse()
            .map_err(|_| Error::parse(s, "window number is not an integer"))?;
        Ok(Self { period, bucket })
    }
}

impl TryFrom<String> for Index {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Index> for String {
    fn from(i: Index) -> Self {
        i.to_string()
    }
}
