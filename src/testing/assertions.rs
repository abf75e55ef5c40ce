//! Assertion functions for windowed collections and their outputs.

use crate::collection::Collection;
use crate::event::Event;
use crate::time::TimestampMs;
use crate::windowed::{BucketKey, WindowedCollection};
use std::collections::BTreeMap;

/// Assert that a collection holds events with exactly these begin times, in order.
///
/// # Panics
///
/// Panics if the timestamps differ.
///
/// # Example
///
/// ```
/// use ironpond::{Collection, Event};
/// use ironpond::testing::assert_timestamps;
/// use serde_json::json;
///
/// let c = Collection::from_events(vec![Event::at(20, json!({})), Event::at(5, json!({}))]);
/// assert_timestamps(&c, &[5, 20]);
/// ```
pub fn assert_timestamps(actual: &Collection, expected: &[TimestampMs]) {
    let got: Vec<TimestampMs> = actual.iter().map(Event::begin).collect();
    assert_eq!(
        got, expected,
        "Timestamp mismatch:\n  Expected: {expected:?}\n  Actual: {got:?}"
    );
}

/// Assert that a windowed collection has exactly these buckets with these sizes.
///
/// # Panics
///
/// Panics if a bucket is missing, unexpected, or has the wrong size.
pub fn assert_bucket_sizes(actual: &WindowedCollection, expected: &[(BucketKey, usize)]) {
    let got: BTreeMap<String, usize> = actual
        .ungroup()
        .iter()
        .map(|(k, c)| (k.to_string(), c.len()))
        .collect();
    let want: BTreeMap<String, usize> = expected.iter().map(|(k, n)| (k.to_string(), *n)).collect();
    assert_eq!(
        got, want,
        "Bucket mismatch:\n  Expected: {want:?}\n  Actual: {got:?}"
    );
}

/// Assert that a numeric field of a summary event is within `tolerance` of `expected`.
///
/// # Panics
///
/// Panics if the field is missing, not numeric, or out of tolerance.
///
/// # Example
///
/// ```
/// use ironpond::Event;
/// use ironpond::testing::assert_field_approx;
/// use serde_json::json;
///
/// let e = Event::at(0, json!({"avg": 2.0000001}));
/// assert_field_approx(&e, "avg", 2.0, 1e-6);
/// ```
pub fn assert_field_approx(event: &Event, field: &str, expected: f64, tolerance: f64) {
    let value = event.get(field);
    let got = value.and_then(serde_json::Value::as_f64);
    match got {
        Some(x) => assert!(
            (x - expected).abs() <= tolerance,
            "Field {field:?} out of tolerance:\n  Expected: {expected} ± {tolerance}\n  Actual: {x}"
        ),
        None => panic!("Field {field:?} is not numeric:\n  Value: {value:?}\n  Event: {event:?}"),
    }
}

/// Assert that every bucket key re-derives from the events stored under it.
///
/// Without a selector (as after
/// [`with_groups`](WindowedCollection::with_groups)) group labels came from
/// the caller, so only the window index is checked.
///
/// # Panics
///
/// Panics if any stored event maps to a key set that does not contain its bucket.
pub fn assert_keys_rederive(windowed: &WindowedCollection) {
    let check_group = windowed.selector().is_some();
    for (key, bucket) in windowed.ungroup() {
        for event in &bucket {
            let keys = windowed
                .bucket_keys(event)
                .unwrap_or_else(|e| panic!("Cannot derive keys for {event:?}: {e}"));
            let found = keys
                .iter()
                .any(|k| k.index() == key.index() && (!check_group || k.group() == key.group()));
            assert!(
                found,
                "Event filed under {key} derives to {keys:?}:\n  Event: {event:?}"
            );
        }
    }
}
