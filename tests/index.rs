use anyhow::Result;
use ironpond::{Error, Index, Key, Period, TimeRange, index_of};

#[test]
fn bucket_partition_matches_floor_division() -> Result<()> {
    for p in [1_i64, 7, 30, 1_000] {
        for t1 in -50_i64..50 {
            for t2 in [-31_i64, -1, 0, 1, 29, 30, 44] {
                let same = index_of(t1, p)? == index_of(t2, p)?;
                assert_eq!(same, t1.div_euclid(p) == t2.div_euclid(p), "t1={t1} t2={t2} p={p}");
            }
        }
    }
    Ok(())
}

#[test]
fn index_recovers_its_window() -> Result<()> {
    let p = Period::from_millis(30)?;
    assert_eq!(Index::of(5, p).to_time_range(), TimeRange::new(0, 30));
    assert_eq!(Index::of(30, p).to_time_range(), TimeRange::new(30, 60));
    assert_eq!(Index::of(-1, p).to_time_range(), TimeRange::new(-30, 0));
    assert_eq!(Index::of(-30, p).to_time_range(), TimeRange::new(-30, 0));
    assert_eq!(Index::of(-31, p).to_time_range(), TimeRange::new(-60, -30));
    Ok(())
}

#[test]
fn non_positive_period_is_rejected() {
    assert!(matches!(index_of(10, 0), Err(Error::Configuration(_))));
    assert!(matches!(index_of(10, -5), Err(Error::Configuration(_))));
}

#[test]
fn index_labels_round_trip() -> Result<()> {
    let p = Period::minutes(30)?;
    let i = Index::of(45 * 60_000, p);
    assert_eq!(i.to_string(), "30m-1");
    assert_eq!("30m-1".parse::<Index>()?, i);

    let before = Index::of(-1, Period::hours(1)?);
    assert_eq!(before.to_string(), "1h--1");
    assert_eq!("1h--1".parse::<Index>()?, before);
    assert_eq!(before.begin(), -3_600_000);
    Ok(())
}

#[test]
fn malformed_index_labels() {
    for bad in ["", "30m", "30x-1", "30m-abc", "-1"] {
        assert!(
            matches!(bad.parse::<Index>(), Err(Error::Parse { .. })),
            "{bad:?} should not parse"
        );
    }
}

#[test]
fn index_is_a_key() -> Result<()> {
    let i = Index::of(95, Period::from_millis(10)?);
    let k = Key::from(i);
    assert_eq!(k.begin(), 90);
    assert_eq!(k.end(), 100);
    assert_eq!(serde_json::to_string(&k)?, r#"{"index":"10ms-9"}"#);
    Ok(())
}

#[test]
fn periods_parse_and_print_canonically() -> Result<()> {
    assert_eq!("30m".parse::<Period>()?.as_millis(), 1_800_000);
    assert_eq!("60m".parse::<Period>()?.to_string(), "1h");
    assert_eq!("1500".parse::<Period>()?.to_string(), "1500ms");
    assert_eq!(Period::from_millis(90_000)?.to_string(), "90s");
    assert_eq!(Period::days(2)?.to_string(), "2d");

    for bad in ["", "0m", "m", "-5m", "5w", "5 m"] {
        assert!(
            matches!(bad.parse::<Period>(), Err(Error::Configuration(_))),
            "{bad:?} should not parse"
        );
    }
    assert!(Period::days(i64::MAX).is_err());
    Ok(())
}
