//! Fluent builders for test event streams.

use crate::collection::Collection;
use crate::event::Event;
use crate::time::TimestampMs;
use serde_json::Value;

/// A fluent builder for sequences of time-keyed events.
///
/// # Example
///
/// ```
/// use ironpond::testing::EventStreamBuilder;
/// use serde_json::json;
///
/// let events = EventStreamBuilder::new()
///     .add(5, json!({"team": "A", "score": 3}))
///     .add_series(100, 10, 3, |i| json!({"n": i}))
///     .build();
///
/// assert_eq!(events.len(), 4);
/// ```
#[derive(Debug, Default)]
pub struct EventStreamBuilder {
    events: Vec<Event>,
}

impl EventStreamBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add one event at `ts`.
    #[must_use]
    pub fn add(mut self, ts: TimestampMs, data: Value) -> Self {
        self.events.push(Event::at(ts, data));
        self
    }

    /// Add `count` events starting at `start`, spaced `step` apart, with
    /// payloads from `payload(i)`.
    #[must_use]
    pub fn add_series<F>(mut self, start: TimestampMs, step: i64, count: usize, payload: F) -> Self
    where
        F: Fn(usize) -> Value,
    {
        let mut ts = start;
        for i in 0..count {
            self.events.push(Event::at(ts, payload(i)));
            ts += step;
        }
        self
    }

    /// Events in insertion order.
    #[must_use]
    pub fn build(self) -> Vec<Event> {
        self.events
    }

    /// Events as a key-ordered [`Collection`].
    #[must_use]
    pub fn build_collection(self) -> Collection {
        Collection::from_events(self.events)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
