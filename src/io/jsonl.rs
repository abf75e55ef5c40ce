//! JSON Lines (JSONL) I/O for events and aggregation results.
//!
//! This module provides:
//! - **Typed vector I/O** with Serde: [`read_jsonl_vec`] and [`write_jsonl_vec`]
//! - **Event collections**: [`read_events_jsonl`] and [`write_events_jsonl`]
//! - **Streaming ingestion** into a windowed collection: [`ingest_jsonl`]
//! - **Summaries**: [`write_summaries_jsonl`], one `{"bucket", "event"}` object per line
//!
//! # Notes
//! - Files are newline-delimited JSON; empty/whitespace-only lines are skipped on read.
//! - Events use their serde form: `{"key": {"time": 1000}, "data": {...}}`.

use crate::collection::Collection;
use crate::event::Event;
use crate::windowed::{BucketKey, WindowedCollection};
use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read a JSONL file into a typed `Vec<T>`.
///
/// # Errors
/// Returns an error if the file cannot be opened, read, or if any line fails
/// to parse into `T`. Errors include the line number.
pub fn read_jsonl_vec<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    let mut out = Vec::<T>::new();
    for_each_line(path, |v| {
        out.push(v);
        Ok(())
    })?;
    Ok(out)
}

/// Write a typed slice as a JSONL file (one JSON value per line).
///
/// Parent directories are created as needed.
///
/// # Returns
/// The number of items written (`data.len()`).
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or any item fails to
/// serialize/flush.
pub fn write_jsonl_vec<T: Serialize>(path: impl AsRef<Path>, data: &[T]) -> Result<usize> {
    write_lines(path.as_ref(), data.iter())
}

/// Read events from a JSONL file into a key-ordered [`Collection`].
///
/// # Errors
/// See [`read_jsonl_vec`].
pub fn read_events_jsonl(path: impl AsRef<Path>) -> Result<Collection> {
    read_jsonl_vec::<Event>(path).map(Collection::from_events)
}

/// Write a collection's events in key order.
///
/// # Errors
/// See [`write_jsonl_vec`].
pub fn write_events_jsonl(path: impl AsRef<Path>, events: &Collection) -> Result<usize> {
    write_lines(path.as_ref(), events.iter())
}

/// Stream events from a JSONL file into `windowed`, one line at a time,
/// returning the final snapshot.
///
/// # Errors
/// Returns an error for unreadable or unparsable lines and for events the
/// collection rejects (for example a strict selector on a missing field).
/// `windowed` itself is never modified.
pub fn ingest_jsonl(
    windowed: &WindowedCollection,
    path: impl AsRef<Path>,
) -> Result<WindowedCollection> {
    let path = path.as_ref();
    let mut current = windowed.clone();
    for_each_line(path, |event: Event| {
        let (next, _) = current.add_event(event)?;
        current = next;
        Ok(())
    })?;
    Ok(current)
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    bucket: &'a BucketKey,
    event: &'a Event,
}

/// Write aggregation output as `{"bucket": "<group>::<index>", "event": {...}}` lines.
///
/// # Errors
/// See [`write_jsonl_vec`].
pub fn write_summaries_jsonl(
    path: impl AsRef<Path>,
    summaries: &BTreeMap<BucketKey, Event>,
) -> Result<usize> {
    write_lines(
        path.as_ref(),
        summaries
            .iter()
            .map(|(bucket, event)| SummaryLine { bucket, event }),
    )
}

fn for_each_line<T, F>(path: &Path, mut f: F) -> Result<()>
where
    T: DeserializeOwned,
    F: FnMut(T) -> Result<()>,
{
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", i + 1, path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let v: T = serde_json::from_str(&line).with_context(|| {
            format!("parse JSONL line {} in {}: {}", i + 1, path.display(), line)
        })?;
        f(v).with_context(|| format!("line {} in {}", i + 1, path.display()))?;
    }
    Ok(())
}

fn write_lines<T, I>(path: &Path, items: I) -> Result<usize>
where
    T: Serialize,
    I: Iterator<Item = T>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    let mut n = 0usize;
    for item in items {
        serde_json::to_writer(&mut w, &item)
            .with_context(|| format!("serialize item #{} to {}", n, path.display()))?;
        w.write_all(b"\n")?;
        n += 1;
    }
    w.flush()?;
    Ok(n)
}
