use anyhow::Result;
use ironpond::combiners::{
    Avg, Count, Difference, First, Keep, Last, Max, Median, Min, Percentile, Reducer, Stdev, Sum,
};
use ironpond::testing::{EventStreamBuilder, assert_field_approx};
use ironpond::{AggregationSpec, Index, Period};
use serde_json::{Value, json};

fn xs() -> Vec<Value> {
    vec![json!(4), json!(1), json!("skip"), json!(null), json!(3.5), json!(7)]
}

#[test]
fn numeric_reducers_skip_non_numbers() {
    let v = xs();
    assert_eq!(Sum.reduce(&v).as_f64(), Some(15.5));
    assert_eq!(Min.reduce(&v).as_f64(), Some(1.0));
    assert_eq!(Max.reduce(&v).as_f64(), Some(7.0));
    assert_eq!(Difference.reduce(&v).as_f64(), Some(6.0));
    assert_eq!(Avg.reduce(&v).as_f64(), Some(15.5 / 4.0));
    assert_eq!(Median.reduce(&v).as_f64(), Some(3.75));
    assert_eq!(Count.reduce(&v), json!(6));
}

#[test]
fn reducers_are_total_over_empty_input() {
    let empty: [Value; 0] = [];
    assert_eq!(Sum.reduce(&empty).as_f64(), Some(0.0));
    assert_eq!(Count.reduce(&empty), json!(0));
    for r in [
        &Avg as &dyn Reducer,
        &Min,
        &Max,
        &Difference,
        &Median,
        &Stdev,
        &Percentile::new(90.0),
        &First,
        &Last,
        &Keep,
    ] {
        assert!(r.reduce(&empty).is_null());
    }
}

#[test]
fn single_element_input() {
    let one = [json!(42)];
    assert_eq!(Sum.reduce(&one).as_f64(), Some(42.0));
    assert_eq!(Avg.reduce(&one).as_f64(), Some(42.0));
    assert_eq!(Median.reduce(&one).as_f64(), Some(42.0));
    assert_eq!(Stdev.reduce(&one).as_f64(), Some(0.0));
    assert_eq!(Percentile::new(99.0).reduce(&one).as_f64(), Some(42.0));
    assert_eq!(Keep.reduce(&one), json!(42));
    assert_eq!(First.reduce(&one), json!(42));
}

#[test]
fn stdev_and_percentiles() {
    let v: Vec<Value> = [2, 4, 4, 4, 5, 5, 7, 9].iter().map(|x| json!(x)).collect();
    assert_eq!(Stdev.reduce(&v).as_f64(), Some(2.0));
    assert_eq!(Percentile::new(0.0).reduce(&v).as_f64(), Some(2.0));
    assert_eq!(Percentile::new(100.0).reduce(&v).as_f64(), Some(9.0));
    // rank 0.5 * 7 = 3.5 -> between 4 and 5
    assert_eq!(Percentile::new(50.0).reduce(&v).as_f64(), Some(4.5));
    assert_eq!(Percentile::new(250.0).reduce(&v).as_f64(), Some(9.0));
}

#[test]
fn selection_reducers() {
    let v = vec![json!("a"), json!("b"), json!("a")];
    assert_eq!(First.reduce(&v), json!("a"));
    assert_eq!(Last.reduce(&v), json!("a"));
    assert!(Keep.reduce(&v).is_null());
    assert_eq!(Keep.reduce(&[json!("x"), json!("x")]), json!("x"));
}

#[test]
fn non_finite_results_become_null() {
    let v = [json!(f64::MAX), json!(f64::MAX)];
    assert!(Sum.reduce(&v).is_null());
}

#[test]
fn closures_are_reducers() -> Result<()> {
    let bucket = EventStreamBuilder::new()
        .add(1, json!({"user": "ann"}))
        .add(2, json!({"user": "bob"}))
        .add(3, json!({"user": "ann"}))
        .build_collection();

    let distinct = |vs: &[Value]| {
        let mut seen: Vec<&Value> = Vec::new();
        for v in vs {
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        json!(seen.len())
    };
    let spec = AggregationSpec::new()
        .field("users", "user", distinct)
        .field("last_user", "user", Last);

    let summary = spec.apply(&bucket, Index::of(0, Period::from_millis(10)?));
    assert_eq!(summary.get("users"), Some(&json!(2)));
    assert_eq!(summary.get("last_user"), Some(&json!("ann")));
    Ok(())
}

#[test]
fn missing_fields_project_as_null() -> Result<()> {
    let bucket = EventStreamBuilder::new()
        .add(1, json!({"v": 2}))
        .add(2, json!({}))
        .add(3, json!({"v": 4}))
        .build_collection();
    let spec = AggregationSpec::new()
        .field("n", "v", Count)
        .field("avg", "v", Avg)
        .field("first", "missing", First);

    let summary = spec.apply(&bucket, Index::of(0, Period::from_millis(10)?));
    assert_eq!(summary.get("n"), Some(&json!(3)));
    assert_field_approx(&summary, "avg", 3.0, 1e-12);
    assert_eq!(summary.get("first"), Some(&Value::Null));
    assert_eq!(summary.data().len(), 3);
    Ok(())
}

#[test]
fn empty_bucket_summary() -> Result<()> {
    let spec = AggregationSpec::new()
        .field("total", "v", Sum)
        .field("mean", "v", Avg);
    let summary = spec.apply(&ironpond::Collection::new(), Index::of(0, Period::seconds(1)?));
    assert_eq!(summary.get("total").and_then(Value::as_f64), Some(0.0));
    assert_eq!(summary.get("mean"), Some(&Value::Null));
    assert_eq!(summary.begin(), 0);
    assert_eq!(summary.end(), 1_000);
    Ok(())
}
