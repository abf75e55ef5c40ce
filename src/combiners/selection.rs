//! Selection reducers: `First`, `Last`, `Keep`

use super::Reducer;
use serde_json::Value;

/// The first value in key order.
#[derive(Clone, Copy, Debug, Default)]
pub struct First;

impl Reducer for First {
    fn reduce(&self, values: &[Value]) -> Value {
        values.first().cloned().unwrap_or(Value::Null)
    }
}

/// The last value in key order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Last;

impl Reducer for Last {
    fn reduce(&self, values: &[Value]) -> Value {
        values.last().cloned().unwrap_or(Value::Null)
    }
}

/// The common value when every value is the same, otherwise `null`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keep;

impl Reducer for Keep {
    fn reduce(&self, values: &[Value]) -> Value {
        match values.split_first() {
            Some((head, rest)) if rest.iter().all(|v| v == head) => head.clone(),
            _ => Value::Null,
        }
    }
}
