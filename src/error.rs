//! Error types for windowing, grouping and aggregation.
//!
//! Every fallible operation in the core returns [`Result<T>`]. Failures are
//! fail-fast: when construction or [`add_event`](crate::WindowedCollection::add_event)
//! returns an error, no snapshot has been modified.
//!
//! Lookups that find nothing (an unknown bucket key, an empty collection) are
//! not errors and surface as `None` or empty results instead.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the windowing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid or missing configuration: a non-positive period, an unparseable
    /// period string, or windowing options required but absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input text that could not be turned into a time, index or bucket key.
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// A strict group selector referenced a field the event does not carry.
    #[error("event has no field {field:?}")]
    MissingField { field: String },

    /// More than one group maps to the same window index in an index-keyed
    /// aggregation.
    #[error("several groups share window index {index}; aggregate by bucket key instead")]
    IndexCollision { index: String },
}

impl Error {
    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn parse<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
