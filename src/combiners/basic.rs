//! Basic arithmetic reducers: Sum, Count, Min, Max, Difference

use super::{Reducer, number, numbers};
use ordered_float::OrderedFloat;
use serde_json::{Value, json};

/* ===================== Sum ===================== */

/// Sum of the numeric values; `0` for an empty bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum;

impl Reducer for Sum {
    fn reduce(&self, values: &[Value]) -> Value {
        number(numbers(values).iter().sum())
    }
}

/* ===================== Count ===================== */

/// Number of values, whatever their type.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl Reducer for Count {
    fn reduce(&self, values: &[Value]) -> Value {
        json!(values.len())
    }
}

/* ===================== Min / Max ===================== */

/// Smallest numeric value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Min;

impl Reducer for Min {
    fn reduce(&self, values: &[Value]) -> Value {
        numbers(values)
            .into_iter()
            .map(OrderedFloat)
            .min()
            .map_or(Value::Null, |m| number(m.0))
    }
}

/// Largest numeric value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Reducer for Max {
    fn reduce(&self, values: &[Value]) -> Value {
        numbers(values)
            .into_iter()
            .map(OrderedFloat)
            .max()
            .map_or(Value::Null, |m| number(m.0))
    }
}

/* ===================== Difference ===================== */

/// Spread of the numeric values, `max - min`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Difference;

impl Reducer for Difference {
    fn reduce(&self, values: &[Value]) -> Value {
        let xs: Vec<OrderedFloat<f64>> = numbers(values).into_iter().map(OrderedFloat).collect();
        match (xs.iter().min(), xs.iter().max()) {
            (Some(lo), Some(hi)) => number(hi.0 - lo.0),
            _ => Value::Null,
        }
    }
}
