//! Keyed events with a JSON object payload.

use crate::key::Key;
use crate::time::{Time, TimeRange, TimestampMs};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single event: a [`Key`] locating it in time plus a field map.
///
/// Fields are addressed by name; a dotted name such as `"sensor.id"` walks
/// into nested objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    key: Key,
    #[serde(default)]
    data: Map<String, Value>,
}

impl Event {
    #[must_use]
    pub fn new(key: impl Into<Key>, data: Map<String, Value>) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }

    /// Build an event from any JSON value. Non-object payloads are stored
    /// under the field `"value"`.
    #[must_use]
    pub fn from_json(key: impl Into<Key>, data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        Self::new(key, data)
    }

    /// Shorthand for a [`Time`]-keyed event.
    #[must_use]
    pub fn at(ts: TimestampMs, data: Value) -> Self {
        Self::from_json(Time::new(ts), data)
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn begin(&self) -> TimestampMs {
        self.key.begin()
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> TimestampMs {
        self.key.end()
    }

    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.key.time_range()
    }

    #[inline]
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Look up a field by name or dotted path.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        if let Some(v) = self.data.get(field) {
            return Some(v);
        }
        let mut parts = field.split('.');
        let mut cur = self.data.get(parts.next()?)?;
        for part in parts {
            cur = match cur {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(cur)
    }

    /// A copy of this event carrying a different key.
    #[must_use]
    pub fn with_key(&self, key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            data: self.data.clone(),
        }
    }
}
