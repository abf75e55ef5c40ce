//! Pre-built event streams for common testing scenarios.

use crate::event::Event;
use serde_json::json;

/// One minute in milliseconds.
pub const MINUTE: i64 = 60_000;

/// Three scored events for two teams across two 30 minute windows:
/// `(5m, A, 3)`, `(20m, A, 5)`, `(45m, B, 10)`.
///
/// # Example
///
/// ```
/// use ironpond::testing::team_scores;
///
/// assert_eq!(team_scores().len(), 3);
/// ```
#[must_use]
pub fn team_scores() -> Vec<Event> {
    vec![
        Event::at(5 * MINUTE, json!({"team": "A", "score": 3})),
        Event::at(20 * MINUTE, json!({"team": "A", "score": 5})),
        Event::at(45 * MINUTE, json!({"team": "B", "score": 10})),
    ]
}

/// Temperature readings from two sensors, one per sensor every 5 minutes for
/// an hour, with nested `sensor.site` fields. Sensor `s2` skips its reading
/// at 30 minutes, and one of its readings lacks a `temp` value.
#[must_use]
pub fn sensor_readings() -> Vec<Event> {
    let mut out = Vec::new();
    for i in 0..12_i64 {
        let ts = i * 5 * MINUTE;
        #[allow(clippy::cast_precision_loss)]
        let base = 20.0 + i as f64 * 0.5;
        out.push(Event::at(
            ts,
            json!({"sensor": {"id": "s1", "site": "north"}, "temp": base}),
        ));
        if i == 6 {
            continue;
        }
        let reading = if i == 9 {
            json!({"sensor": {"id": "s2", "site": "south"}})
        } else {
            json!({"sensor": {"id": "s2", "site": "south"}, "temp": base + 1.0})
        };
        out.push(Event::at(ts, reading));
    }
    out
}

/// Events whose `tags` array names every group they belong to.
#[must_use]
pub fn tagged_events() -> Vec<Event> {
    vec![
        Event::at(1_000, json!({"tags": ["red"], "v": 1})),
        Event::at(2_000, json!({"tags": ["red", "blue"], "v": 2})),
        Event::at(3_000, json!({"tags": [], "v": 3})),
        Event::at(4_000, json!({"tags": ["blue", "blue"], "v": 4})),
    ]
}
