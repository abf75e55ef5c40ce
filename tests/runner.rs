use anyhow::Result;
use ironpond::{ExecMode, Runner};
use std::collections::BTreeMap;

fn squares() -> BTreeMap<u32, u64> {
    (0..200u32).map(|k| (k, u64::from(k) * 3)).collect()
}

#[test]
fn sequential_keeps_keys_and_order() -> Result<()> {
    let out = Runner::default().run_map(&squares(), |k, v| u64::from(*k) + v)?;
    assert_eq!(out.len(), 200);
    assert_eq!(out[&10], 40);
    assert!(out.keys().copied().eq(0..200));
    Ok(())
}

#[test]
fn empty_input_gives_empty_output() -> Result<()> {
    let empty: BTreeMap<String, u8> = BTreeMap::new();
    let out = Runner::new(ExecMode::Sequential).run_map(&empty, |_, v| *v)?;
    assert!(out.is_empty());
    Ok(())
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() -> Result<()> {
    let data = squares();
    let f = |k: &u32, v: &u64| format!("{k}:{v}");
    let seq = Runner::new(ExecMode::Sequential).run_map(&data, f)?;
    for threads in [None, Some(1), Some(4)] {
        let par = Runner::new(ExecMode::Parallel { threads }).run_map(&data, f)?;
        assert_eq!(par, seq);
    }
    Ok(())
}
