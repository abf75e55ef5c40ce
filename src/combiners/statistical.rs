//! Statistical reducers: `Avg`, `Median`, `Stdev`, `Percentile`

use super::{Reducer, number, numbers};
use ordered_float::OrderedFloat;
use serde_json::Value;

fn sorted(values: &[Value]) -> Vec<f64> {
    let mut xs = numbers(values);
    xs.sort_by_key(|x| OrderedFloat(*x));
    xs
}

/* ===================== Avg ===================== */

/// Arithmetic mean of the numeric values.
///
/// Empty buckets produce `null`, not `0`, so "no data" stays distinguishable
/// from a real zero average.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avg;

impl Reducer for Avg {
    #[allow(clippy::cast_precision_loss)]
    fn reduce(&self, values: &[Value]) -> Value {
        let xs = numbers(values);
        if xs.is_empty() {
            return Value::Null;
        }
        number(xs.iter().sum::<f64>() / xs.len() as f64)
    }
}

/* ===================== Median ===================== */

#[derive(Clone, Copy, Debug, Default)]
pub struct Median;

impl Reducer for Median {
    fn reduce(&self, values: &[Value]) -> Value {
        let xs = sorted(values);
        let n = xs.len();
        match n {
            0 => Value::Null,
            _ if n % 2 == 1 => number(xs[n / 2]),
            _ => number((xs[n / 2 - 1] + xs[n / 2]) / 2.0),
        }
    }
}

/* ===================== Stdev ===================== */

/// Population standard deviation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdev;

impl Reducer for Stdev {
    #[allow(clippy::cast_precision_loss)]
    fn reduce(&self, values: &[Value]) -> Value {
        let xs = numbers(values);
        if xs.is_empty() {
            return Value::Null;
        }
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        number(var.sqrt())
    }
}

/* ===================== Percentile ===================== */

/// The `q`-th percentile (`0.0..=100.0`), interpolating linearly between the
/// two nearest ranks. `q` outside that range is clamped.
#[derive(Clone, Copy, Debug)]
pub struct Percentile {
    q: f64,
}

impl Percentile {
    #[must_use]
    pub const fn new(q: f64) -> Self {
        Self { q }
    }
}

impl Reducer for Percentile {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn reduce(&self, values: &[Value]) -> Value {
        let xs = sorted(values);
        if xs.is_empty() {
            return Value::Null;
        }
        let q = if self.q.is_nan() { 50.0 } else { self.q.clamp(0.0, 100.0) };
        let rank = q / 100.0 * (xs.len() - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let frac = rank - rank.floor();
        number(xs[lo] + (xs[hi] - xs[lo]) * frac)
    }
}
