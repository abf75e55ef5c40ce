//! Field-wise reduction of a bucket into one summary event.
//!
//! An [`AggregationSpec`] maps each output field to a source field and a
//! [`Reducer`]. Applied to a bucket, it projects the source field out of
//! every event (a missing field contributes `null`), reduces the projected
//! values, and stores the result under the output name.
//!
//! ```
//! use ironpond::{AggregationSpec, Collection, Event, Index, Period};
//! use ironpond::combiners::{Avg, Count, Sum};
//! use serde_json::json;
//!
//! let spec = AggregationSpec::new()
//!     .field("total", "score", Sum)
//!     .field("mean", "score", Avg)
//!     .field("n", "score", Count);
//!
//! let bucket = Collection::from_events(vec![
//!     Event::at(5, json!({"score": 3})),
//!     Event::at(20, json!({"score": 5})),
//! ]);
//! let index = Index::of(5, Period::from_millis(30).unwrap());
//! let summary = spec.apply(&bucket, index);
//! assert_eq!(summary.get("total").and_then(|v| v.as_f64()), Some(8.0));
//! assert_eq!(summary.get("mean").and_then(|v| v.as_f64()), Some(4.0));
//! assert_eq!(summary.get("n"), Some(&json!(2)));
//! ```

use crate::collection::Collection;
use crate::combiners::Reducer;
use crate::event::Event;
use crate::index::Index;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Source field plus the reducer applied to its values.
#[derive(Clone)]
pub struct FieldSpec {
    source: String,
    reducer: Arc<dyn Reducer>,
}

impl FieldSpec {
    pub fn new<R: Reducer>(source: impl Into<String>, reducer: R) -> Self {
        Self {
            source: source.into(),
            reducer: Arc::new(reducer),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Project and reduce one bucket.
    #[must_use]
    pub fn evaluate(&self, bucket: &Collection) -> Value {
        let values: Vec<Value> = bucket
            .values(&self.source)
            .map(|v| v.cloned().unwrap_or(Value::Null))
            .collect();
        self.reducer.reduce(&values)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Output field name → [`FieldSpec`].
#[derive(Clone, Debug, Default)]
pub struct AggregationSpec {
    fields: BTreeMap<String, FieldSpec>,
}

impl AggregationSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the output field `output`, reducing `source` with `reducer`.
    #[must_use]
    pub fn field<R: Reducer>(
        mut self,
        output: impl Into<String>,
        source: impl Into<String>,
        reducer: R,
    ) -> Self {
        self.fields.insert(output.into(), FieldSpec::new(source, reducer));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reduce `bucket` into a summary event keyed by `index`.
    #[must_use]
    pub fn apply(&self, bucket: &Collection, index: Index) -> Event {
        let data: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, spec)| (name.clone(), spec.evaluate(bucket)))
            .collect();
        Event::new(index, data)
    }
}
