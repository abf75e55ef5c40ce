use anyhow::Result;
use ironpond::testing::*;
use ironpond::{BucketKey, Collection, Event, Index, Period, WindowOptions, WindowedCollection};
use serde_json::json;

#[test]
fn test_event_stream_builder() {
    let b = EventStreamBuilder::new()
        .add(50, json!({"x": 1}))
        .add_series(0, 10, 3, |i| json!({"i": i}));
    assert_eq!(b.len(), 4);
    assert!(!b.is_empty());

    let c = b.build_collection();
    assert_timestamps(&c, &[0, 10, 20, 50]);
}

#[test]
fn test_team_scores_fixture() {
    let events = team_scores();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.get("team").is_some()));
}

#[test]
fn test_sensor_readings_fixture() {
    let events = sensor_readings();
    assert_eq!(events.len(), 23);
    assert_eq!(events.iter().filter(|e| e.get("temp").is_none()).count(), 1);
    assert!(events.iter().all(|e| e.get("sensor.id").is_some()));
}

#[test]
fn test_tagged_events_fixture() {
    let events = tagged_events();
    assert!(events.iter().all(|e| e.get("tags").is_some_and(|t| t.is_array())));
}

#[test]
fn test_assert_bucket_sizes() -> Result<()> {
    let opts = WindowOptions::new(Period::seconds(1)?);
    let w = WindowedCollection::new(opts, Some(&Collection::from_events(vec![
        Event::at(100, json!({})),
        Event::at(900, json!({})),
        Event::at(1_100, json!({})),
    ])))?;
    assert_bucket_sizes(
        &w,
        &[
            (BucketKey::ungrouped(Index::of(0, opts.period)), 2),
            (BucketKey::ungrouped(Index::of(1_000, opts.period)), 1),
        ],
    );
    Ok(())
}

#[test]
#[should_panic(expected = "Bucket mismatch")]
fn test_assert_bucket_sizes_fails() {
    let w = WindowedCollection::from_buckets(Default::default());
    let k = BucketKey::ungrouped(Index::of(0, Period::seconds(1).unwrap()));
    assert_bucket_sizes(&w, &[(k, 1)]);
}

#[test]
#[should_panic(expected = "out of tolerance")]
fn test_assert_field_approx_fails() {
    assert_field_approx(&Event::at(0, json!({"v": 1.5})), "v", 1.0, 0.1);
}

#[test]
#[should_panic(expected = "not numeric")]
fn test_assert_field_approx_missing() {
    assert_field_approx(&Event::at(0, json!({})), "v", 1.0, 0.1);
}

#[test]
fn test_assert_keys_rederive_passes_for_windowed_input() -> Result<()> {
    let opts = WindowOptions::new(Period::minutes(10)?);
    let w = WindowedCollection::grouped(opts, "sensor.id", None)?.add_events(sensor_readings())?;
    assert_keys_rederive(&w);
    Ok(())
}

#[test]
#[should_panic(expected = "Cannot derive keys")]
fn test_assert_keys_rederive_needs_options() {
    let period = Period::seconds(1).unwrap();
    let mut m = std::collections::BTreeMap::new();
    m.insert(
        BucketKey::ungrouped(Index::of(5_000, period)),
        Collection::from_events(vec![Event::at(0, json!({}))]),
    );
    assert_keys_rederive(&WindowedCollection::from_buckets(m));
}

#[cfg(feature = "io-jsonl")]
#[test]
fn test_temp_jsonl() -> Result<()> {
    let tmp = temp_jsonl(&[json!({"a": 1}), json!({"a": 2})])?;
    let text = std::fs::read_to_string(tmp.path())?;
    assert_eq!(text.lines().count(), 2);
    assert!(tmp.path().extension().is_some_and(|e| e == "jsonl"));
    Ok(())
}
