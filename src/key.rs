//! The closed set of event keys.
//!
//! Every [`Event`](crate::Event) is keyed by exactly one of [`Time`],
//! [`TimeRange`] or [`Index`]. All three expose `begin()`/`end()` and order
//! by `(begin, end)`, which is the order collections keep their events in.

use crate::index::Index;
use crate::time::{Time, TimeRange, TimestampMs};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Time(Time),
    TimeRange(TimeRange),
    Index(Index),
}

impl Key {
    #[inline]
    #[must_use]
    pub fn begin(&self) -> TimestampMs {
        match self {
            Self::Time(t) => t.begin(),
            Self::TimeRange(r) => r.begin(),
            Self::Index(i) => i.begin(),
        }
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> TimestampMs {
        match self {
            Self::Time(t) => t.end(),
            Self::TimeRange(r) => r.end(),
            Self::Index(i) => i.end(),
        }
    }

    /// The extent of the key as a range (zero width for a [`Time`]).
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.begin(), self.end())
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Time(_) => 0,
            Self::TimeRange(_) => 1,
            Self::Index(_) => 2,
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin()
            .cmp(&other.begin())
            .then(self.end().cmp(&other.end()))
            .then(self.rank().cmp(&other.rank()))
            .then_with(|| match (self, other) {
                (Self::Index(a), Self::Index(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Time> for Key {
    fn from(t: Time) -> Self {
        Self::Time(t)
    }
}

impl From<TimestampMs> for Key {
    fn from(ts: TimestampMs) -> Self {
        Self::Time(Time::new(ts))
    }
}

impl From<TimeRange> for Key {
    fn from(r: TimeRange) -> Self {
        Self::TimeRange(r)
    }
}

impl From<Index> for Key {
    fn from(i: Index) -> Self {
        Self::Index(i)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(t) => t.fmt(f),
            Self::TimeRange(r) => r.fmt(f),
            Self::Index(i) => i.fmt(f),
        }
    }
}
