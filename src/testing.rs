//! Testing utilities for code built on ironpond.
//!
//! This module provides helpers for writing tests against windowed
//! collections and aggregations:
//!
//! - **Assertions**: check bucket layouts, timestamps and numeric summaries
//! - **Builders**: generate event streams fluently
//! - **Fixtures**: pre-built event streams for common scenarios
//! - **Mock I/O**: temporary JSONL files (feature `io-jsonl`)
//!
//! # Quick Start
//!
//! ```
//! use ironpond::*;
//! use ironpond::combiners::Sum;
//! use ironpond::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let opts = WindowOptions::new(Period::minutes(30)?);
//! let events = Collection::from_events(team_scores());
//! let windowed = WindowedCollection::grouped(opts, "team", Some(&events))?;
//!
//! let a = BucketKey::new("A", Index::of(0, opts.period));
//! let b = BucketKey::new("B", Index::of(30 * MINUTE, opts.period));
//! assert_bucket_sizes(&windowed, &[(a.clone(), 2), (b, 1)]);
//! assert_keys_rederive(&windowed);
//!
//! let sums = windowed.aggregate(&AggregationSpec::new().field("total", "score", Sum));
//! assert_field_approx(&sums[&a], "total", 8.0, 1e-9);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

#[cfg(feature = "io-jsonl")]
pub mod mock_io;

// Re-export commonly used items
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

#[cfg(feature = "io-jsonl")]
pub use mock_io::*;
