//! Window widths.
//!
//! A [`Period`] is a strictly positive duration in milliseconds. It is the
//! width of every tumbling window produced by [`Index::of`](crate::Index::of)
//! and has a canonical text form made of a count and a unit:
//!
//! | unit | meaning      |
//! |------|--------------|
//! | `ms` | milliseconds |
//! | `s`  | seconds      |
//! | `m`  | minutes      |
//! | `h`  | hours        |
//! | `d`  | days         |
//!
//! The canonical form always uses the largest unit that divides the period
//! evenly, so `Period::from_millis(90_000)` prints as `"90s"` and
//! `"60m".parse::<Period>()` prints as `"1h"`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const UNITS: [(&str, i64); 5] = [
    ("d", 86_400_000),
    ("h", 3_600_000),
    ("m", 60_000),
    ("s", 1_000),
    ("ms", 1),
];

/// Fixed, positive window width in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodRepr", into = "String")]
pub struct Period {
    millis: i64,
}

impl Period {
    /// Build a period from a millisecond count.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when `millis <= 0`.
    pub fn from_millis(millis: i64) -> Result<Self> {
        if millis <= 0 {
            return Err(Error::config(format!(
                "window period must be positive, got {millis}ms"
            )));
        }
        Ok(Self { millis })
    }

    /// # Errors
    /// Returns [`Error::Configuration`] for a non-positive or overflowing count.
    pub fn seconds(n: i64) -> Result<Self> {
        Self::scaled(n, 1_000)
    }

    /// # Errors
    /// Returns [`Error::Configuration`] for a non-positive or overflowing count.
    pub fn minutes(n: i64) -> Result<Self> {
        Self::scaled(n, 60_000)
    }

    /// # Errors
    /// Returns [`Error::Configuration`] for a non-positive or overflowing count.
    pub fn hours(n: i64) -> Result<Self> {
        Self::scaled(n, 3_600_000)
    }

    /// # Errors
    /// Returns [`Error::Configuration`] for a non-positive or overflowing count.
    pub fn days(n: i64) -> Result<Self> {
        Self::scaled(n, 86_400_000)
    }

    fn scaled(n: i64, unit: i64) -> Result<Self> {
        let millis = n
            .checked_mul(unit)
            .ok_or_else(|| Error::config(format!("window period overflows: {n} x {unit}ms")))?;
        Self::from_millis(millis)
    }

    /// Width in milliseconds (always `> 0`).
    #[inline]
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.millis
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (suffix, unit) in UNITS {
            if self.millis % unit == 0 {
                return write!(f, "{}{}", self.millis / unit, suffix);
            }
        }
        unreachable!("every period is a whole number of milliseconds")
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        let (digits, suffix) = text.split_at(split);
        if digits.is_empty() {
            return Err(Error::config(format!("invalid window period {s:?}")));
        }
        let n: i64 = digits
            .parse()
            .map_err(|_| Error::config(format!("invalid window period {s:?}")))?;
        let unit = match suffix {
            "" | "ms" => 1,
            "s" => 1_000,
            "m" => 60_000,
            "h" => 3_600_000,
            "d" => 86_400_000,
            other => {
                return Err(Error::config(format!(
                    "unknown unit {other:?} in window period {s:?}"
                )));
            }
        };
        Self::scaled(n, unit)
    }
}

impl TryFrom<i64> for Period {
    type Error = Error;

    fn try_from(millis: i64) -> Result<Self> {
        Self::from_millis(millis)
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

// Config files may spell a period either as "30m" or as raw milliseconds.
#[derive(Deserialize)]
#[serde(untagged)]
enum PeriodRepr {
    Text(String),
    Millis(i64),
}

impl TryFrom<PeriodRepr> for Period {
    type Error = Error;

    fn try_from(repr: PeriodRepr) -> Result<Self> {
        match repr {
            PeriodRepr::Text(s) => s.parse(),
            PeriodRepr::Millis(ms) => Self::from_millis(ms),
        }
    }
}
