//! Built-in reducers for bucket aggregation.
//!
//! A [`Reducer`] turns the sequence of values one field takes across a
//! bucket into a single value. Every reducer is total: it accepts empty and
//! single-element input.
//!
//! | reducer            | empty input | notes                                  |
//! |--------------------|-------------|----------------------------------------|
//! | [`Sum`]            | `0`         | numbers only                           |
//! | [`Count`]          | `0`         | counts every value, missing included   |
//! | [`Min`] / [`Max`]  | `null`      | numbers only                           |
//! | [`Difference`]     | `null`      | `max - min`                            |
//! | [`Avg`]            | `null`      | arithmetic mean                        |
//! | [`Median`]         | `null`      | mean of the two middles on even input  |
//! | [`Stdev`]          | `null`      | population standard deviation          |
//! | [`Percentile`]     | `null`      | linear interpolation between ranks     |
//! | [`First`]/[`Last`] | `null`      | any JSON value                         |
//! | [`Keep`]           | `null`      | the value if all are equal, else null  |
//!
//! Numeric reducers skip values that are not JSON numbers (including the
//! `null` standing in for a missing field) and compute in `f64`. A result
//! that is not finite is reported as `null`.
//!
//! Any `Fn(&[Value]) -> Value + Send + Sync` closure is also a reducer.
//!
//! # Examples
//! ```
//! use ironpond::combiners::{Avg, Reducer, Sum};
//! use serde_json::json;
//!
//! let xs = [json!(1), json!(2), json!(3), json!(null)];
//! assert_eq!(Sum.reduce(&xs).as_f64(), Some(6.0));
//! assert_eq!(Avg.reduce(&xs).as_f64(), Some(2.0));
//! assert!(Avg.reduce(&[]).is_null());
//!
//! let distinct = |vs: &[serde_json::Value]| json!(vs.iter().filter(|v| !v.is_null()).count());
//! assert_eq!(distinct.reduce(&xs), json!(3));
//! ```

mod basic;
mod selection;
mod statistical;

pub use basic::{Count, Difference, Max, Min, Sum};
pub use selection::{First, Keep, Last};
pub use statistical::{Avg, Median, Percentile, Stdev};

use serde_json::{Number, Value};

/// Reduce the values of one field across a bucket.
pub trait Reducer: Send + Sync + 'static {
    fn reduce(&self, values: &[Value]) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    fn reduce(&self, values: &[Value]) -> Value {
        self(values)
    }
}

/// The numeric members of `values`, in order.
pub(crate) fn numbers(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_f64).collect()
}

/// Wrap an `f64` as JSON; NaN and infinities become `null`.
pub(crate) fn number(x: f64) -> Value {
    Number::from_f64(x).map_or(Value::Null, Value::Number)
}
