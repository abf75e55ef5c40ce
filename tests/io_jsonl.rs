#![cfg(feature = "io-jsonl")]

use anyhow::Result;
use ironpond::combiners::Sum;
use ironpond::io::jsonl::{read_jsonl_vec, write_jsonl_vec, write_summaries_jsonl};
use ironpond::testing::*;
use ironpond::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Rec {
    id: u32,
    name: String,
}

#[test]
fn typed_vec_round_trip() -> Result<()> {
    let dir = TempDirPath::new()?;
    let path = dir.file_path("nested/out.jsonl");
    let data = vec![
        Rec { id: 1, name: "a".into() },
        Rec { id: 2, name: "b".into() },
    ];
    let n = write_jsonl_vec(&path, &data)?;
    assert_eq!(n, 2);
    let back: Vec<Rec> = read_jsonl_vec(&path)?;
    assert_eq!(back, data);
    Ok(())
}

#[test]
fn events_round_trip_in_key_order() -> Result<()> {
    let dir = TempDirPath::new()?;
    let path = dir.file_path("events.jsonl");
    let events = Collection::from_events(sensor_readings());
    write_events_jsonl(&path, &events)?;

    let back = read_events_jsonl(&path)?;
    assert_eq!(back, events);
    Ok(())
}

#[test]
fn blank_lines_are_skipped_and_errors_name_the_line() -> Result<()> {
    let dir = TempDirPath::new()?;
    let path = dir.file_path("gaps.jsonl");
    std::fs::write(
        &path,
        "{\"key\":{\"time\":1},\"data\":{}}\n\n   \n{\"key\":{\"time\":2}}\n",
    )?;
    assert_eq!(read_events_jsonl(&path)?.len(), 2);

    std::fs::write(&path, "{\"key\":{\"time\":1},\"data\":{}}\nnot json\n")?;
    let err = read_events_jsonl(&path).unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));
    Ok(())
}

#[test]
fn ingest_streams_into_a_snapshot() -> Result<()> {
    let tmp = temp_events_jsonl(&team_scores())?;
    let opts = WindowOptions::new(Period::minutes(30)?);
    let empty = WindowedCollection::grouped(opts, "team", None)?;

    let loaded = ingest_jsonl(&empty, tmp.path())?;
    assert!(empty.is_empty());
    assert_eq!(loaded.len(), 2);
    assert_keys_rederive(&loaded);
    Ok(())
}

#[test]
fn ingest_reports_rejected_events() -> Result<()> {
    let tmp = temp_events_jsonl(&[Event::at(0, json!({"score": 1}))])?;
    let opts = WindowOptions::new(Period::minutes(30)?).strict(true);
    let empty = WindowedCollection::grouped(opts, "team", None)?;

    let err = ingest_jsonl(&empty, tmp.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::MissingField { .. })
    ));
    Ok(())
}

#[test]
fn summaries_are_written_per_bucket() -> Result<()> {
    let opts = WindowOptions::new(Period::minutes(30)?);
    let windowed = WindowedCollection::grouped(opts, "team", None)?.add_events(team_scores())?;
    let summaries = windowed.aggregate(&AggregationSpec::new().field("total", "score", Sum));

    let dir = TempDirPath::new()?;
    let path = dir.file_path("summaries.jsonl");
    assert_eq!(write_summaries_jsonl(&path, &summaries)?, 2);

    let lines: Vec<Value> = read_jsonl_vec(&path)?;
    assert_eq!(lines[0]["bucket"], json!("A::30m-0"));
    assert_eq!(lines[0]["event"]["key"], json!({"index": "30m-0"}));
    assert_eq!(lines[1]["event"]["data"]["total"].as_f64(), Some(10.0));
    Ok(())
}
