use anyhow::Result;
use ironpond::{Alignment, Error, Key, Period, Time, TimeRange};

const MINUTE: i64 = 60_000;

#[test]
fn begin_and_end_are_the_timestamp() {
    let t = Time::new(1_234);
    assert_eq!(t.begin(), 1_234);
    assert_eq!(t.end(), 1_234);
    assert!(Time::new(1) < Time::new(2));
}

#[test]
fn alignment_arithmetic_in_minutes() -> Result<()> {
    let t = Time::new(100 * MINUTE);
    let d = Period::minutes(10)?;

    assert_eq!(
        t.to_time_range(d, Alignment::Begin),
        TimeRange::new(100 * MINUTE, 110 * MINUTE)
    );
    assert_eq!(
        t.to_time_range(d, Alignment::Middle),
        TimeRange::new(95 * MINUTE, 105 * MINUTE)
    );
    assert_eq!(
        t.to_time_range(d, Alignment::End),
        TimeRange::new(90 * MINUTE, 100 * MINUTE)
    );
    Ok(())
}

#[test]
fn middle_alignment_rounds_half_away_from_zero() -> Result<()> {
    // d = 5ms: half is 2.5, rounded to 3
    let r = Time::new(100).to_time_range(Period::from_millis(5)?, Alignment::Middle);
    assert_eq!(r, TimeRange::new(97, 102));
    assert_eq!(r.duration(), 5);

    // d = 1ms: half is 0.5, rounded to 1
    let r = Time::new(0).to_time_range(Period::from_millis(1)?, Alignment::Middle);
    assert_eq!(r, TimeRange::new(-1, 0));
    Ok(())
}

#[test]
fn parse_time_from_strings() -> Result<()> {
    assert_eq!("1500".parse::<Time>()?, Time::new(1_500));
    assert_eq!("-20".parse::<Time>()?, Time::new(-20));
    assert_eq!("1970-01-01T00:00:01Z".parse::<Time>()?, Time::new(1_000));
    assert_eq!("1970-01-01T01:00:00+01:00".parse::<Time>()?, Time::new(0));
    assert_eq!("1970-01-02".parse::<Time>()?, Time::new(86_400_000));
    assert_eq!("1970-01-01 00:01:00".parse::<Time>()?, Time::new(MINUTE));
    assert_eq!("1970-01-01T00:01:00".parse::<Time>()?, Time::new(MINUTE));
    assert_eq!(
        "2015-04-22T03:30:00.250".parse::<Time>()?,
        "2015-04-22T03:30:00.250Z".parse::<Time>()?
    );
    Ok(())
}

#[test]
fn malformed_time_is_a_parse_error() {
    let err = "yesterday-ish".parse::<Time>().unwrap_err();
    assert!(matches!(err, Error::Parse { ref input, .. } if input == "yesterday-ish"));
}

#[test]
fn now_is_recent() {
    let now = Time::now();
    // 2020-01-01T00:00:00Z
    assert!(now.timestamp() > 1_577_836_800_000);
    assert!(now.to_datetime().is_some());
}

#[test]
fn time_range_relations() {
    let a = TimeRange::new(0, 10);
    let b = TimeRange::new(5, 15);
    let c = TimeRange::new(10, 20);

    assert!(a.contains(0));
    assert!(!a.contains(10));
    assert!(a.overlaps(&b));
    assert!(a.disjoint(&c));
    assert_eq!(a.intersection(&b), Some(TimeRange::new(5, 10)));
    assert_eq!(a.intersection(&c), None);
    assert_eq!(a.extents(&c), TimeRange::new(0, 20));
    assert!(TimeRange::new(0, 20).contains_range(&b));
    assert_eq!(TimeRange::new(10, 0), TimeRange::new(0, 10));
    assert_eq!(a.to_string(), "[0, 10)");
}

#[test]
fn keys_order_by_begin_then_end() {
    let mut keys = vec![
        Key::from(TimeRange::new(5, 9)),
        Key::from(Time::new(5)),
        Key::from(Time::new(1)),
        Key::from(TimeRange::new(5, 6)),
    ];
    keys.sort();
    assert_eq!(
        keys,
        vec![
            Key::from(Time::new(1)),
            Key::from(Time::new(5)),
            Key::from(TimeRange::new(5, 6)),
            Key::from(TimeRange::new(5, 9)),
        ]
    );
}

#[test]
fn key_serde_form() -> Result<()> {
    let k: Key = serde_json::from_str(r#"{"timerange": [10, 20]}"#)?;
    assert_eq!(k, Key::from(TimeRange::new(10, 20)));
    assert_eq!(serde_json::to_string(&Key::from(Time::new(7)))?, r#"{"time":7}"#);
    Ok(())
}
