//! # Ironpond
//!
//! A **windowing and grouping engine** for time-stamped event streams.
//! Ironpond files incoming events into buckets keyed by *(group, time window)*,
//! keeps each bucket as a time-ordered collection, and reduces buckets into
//! summary events with per-field reducers.
//!
//! ## Key Features
//!
//! - **Deterministic tumbling windows** - epoch-aligned, so replays and batch runs agree
//! - **Flexible grouping** - by field, by several fields, or by any function of the event
//! - **Persistent snapshots** - every ingestion returns a new snapshot; old ones stay valid
//! - **Incremental updates** - ingestion reports exactly which buckets changed
//! - **Built-in reducers** - Sum, Count, Avg, Min, Max, Median, Stdev, Percentile and more
//! - **Sequential and parallel aggregation** - same results either way
//! - **JSON Lines I/O** - read, stream and write events (feature `io-jsonl`)
//!
//! ## Quick Start
//!
//! ```
//! use ironpond::*;
//! use ironpond::combiners::{Count, Sum};
//! use serde_json::json;
//!
//! # fn main() -> std::result::Result<(), ironpond::Error> {
//! let minute = 60_000;
//! let opts = WindowOptions::new(Period::minutes(30)?);
//! let windowed = WindowedCollection::grouped(opts, "team", None)?
//!     .add_events(vec![
//!         Event::at(5 * minute, json!({"team": "A", "score": 3})),
//!         Event::at(20 * minute, json!({"team": "A", "score": 5})),
//!         Event::at(45 * minute, json!({"team": "B", "score": 10})),
//!     ])?;
//!
//! assert_eq!(windowed.len(), 2);
//!
//! let spec = AggregationSpec::new()
//!     .field("total", "score", Sum)
//!     .field("events", "score", Count);
//! let summaries = windowed.aggregate(&spec);
//!
//! let a = BucketKey::new("A", Index::of(0, opts.period));
//! assert_eq!(summaries[&a].get("total").and_then(|v| v.as_f64()), Some(8.0));
//!
//! let all = windowed.flatten();
//! let times: Vec<_> = all.iter().map(|e| e.begin() / minute).collect();
//! assert_eq!(times, vec![5, 20, 45]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Keys
//!
//! Every [`Event`] carries a [`Key`]: a [`Time`], a [`TimeRange`] or a window
//! [`Index`]. Keys expose `begin()`/`end()` and order by them.
//!
//! ### Windows
//!
//! A [`Period`] cuts time into contiguous, epoch-aligned windows. [`Index::of`]
//! names the window holding a timestamp (`"30m-0"`), and
//! [`Index::to_time_range`] turns the name back into `[begin, end)`.
//!
//! ### Windowed collections
//!
//! A [`WindowedCollection`] maps [`BucketKey`]s to [`Collection`]s.
//! [`add_event`](WindowedCollection::add_event) returns the next snapshot and
//! the changed buckets; [`aggregate`](WindowedCollection::aggregate),
//! [`flatten`](WindowedCollection::flatten) and
//! [`ungroup`](WindowedCollection::ungroup) read it.
//!
//! ### Reducers
//!
//! The [`combiners`] module provides the built-in [`Reducer`]s. Any
//! `Fn(&[serde_json::Value]) -> serde_json::Value` closure works as well.
//!
//! ## Module Overview
//!
//! - [`time`] - [`Time`], [`TimeRange`] and [`Alignment`]
//! - [`period`] - window widths
//! - [`index`] - window indexing
//! - [`key`] - the closed [`Key`] variant
//! - [`event`] - events and field access
//! - [`collection`] - persistent, key-ordered event collections
//! - [`grouping`] - group selectors
//! - [`options`] - windowing configuration
//! - [`windowed`] - the windowed collection
//! - [`aggregation`] - aggregation specs
//! - [`combiners`] - built-in reducers
//! - [`runner`] - sequential and parallel execution
//! - [`io`] - JSON Lines I/O
//! - [`testing`] - helpers for tests

pub mod aggregation;
pub mod collection;
pub mod combiners;
pub mod error;
pub mod event;
pub mod grouping;
pub mod index;
pub mod io;
pub mod key;
pub mod options;
pub mod period;
pub mod runner;
pub mod testing;
pub mod time;
pub mod windowed;

// General re-exports
pub use aggregation::{AggregationSpec, FieldSpec};
pub use collection::Collection;
pub use combiners::Reducer;
pub use error::Error;
pub use event::Event;
pub use grouping::{GroupFn, GroupSelector, NO_GROUP};
pub use index::{Index, index_of};
pub use key::Key;
pub use options::WindowOptions;
pub use period::Period;
pub use runner::{ExecMode, Runner};
pub use time::{Alignment, Time, TimeRange, TimestampMs};
pub use windowed::{BucketKey, Changed, WindowedCollection};

// Gated re-exports
#[cfg(feature = "io-jsonl")]
pub use io::jsonl::{ingest_jsonl, read_events_jsonl, write_events_jsonl};
