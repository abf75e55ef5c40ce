//! Windowing configuration.
//!
//! [`WindowOptions`] is plain serde data so it can be embedded in any
//! configuration file. Periods accept either a unit string or raw
//! milliseconds:
//!
//! ```
//! use ironpond::{Period, WindowOptions};
//!
//! let opts = WindowOptions::from_json(r#"{"period": "30m", "trigger": 100}"#).unwrap();
//! assert_eq!(opts.period, Period::minutes(30).unwrap());
//! assert_eq!(opts.trigger, Some(100));
//! assert!(!opts.strict_grouping);
//! ```

use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::period::Period;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// Width of every window.
    pub period: Period,
    /// Advisory event count at which a bucket may be treated as ready.
    /// Never enforced by ingestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<usize>,
    /// Fail ingestion when a field selector finds no value, instead of
    /// filing the event under the empty group.
    #[serde(default)]
    pub strict_grouping: bool,
}

impl WindowOptions {
    #[must_use]
    pub const fn new(period: Period) -> Self {
        Self {
            period,
            trigger: None,
            strict_grouping: false,
        }
    }

    #[must_use]
    pub const fn with_trigger(mut self, count: usize) -> Self {
        self.trigger = Some(count);
        self
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict_grouping = strict;
        self
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] for malformed JSON, a missing or
    /// non-positive period, or an unknown period unit.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::config(format!("invalid window options: {e}")))
    }

    /// True when `bucket` has reached the trigger count. Without a trigger
    /// every non-empty bucket is ready.
    #[must_use]
    pub fn is_ready(&self, bucket: &Collection) -> bool {
        match self.trigger {
            Some(n) => bucket.len() >= n,
            None => !bucket.is_empty(),
        }
    }
}
