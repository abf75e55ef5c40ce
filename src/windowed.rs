//! Grouped, windowed event buckets.
//!
//! A [`WindowedCollection`] files every event under a [`BucketKey`] made of a
//! group label and the tumbling window [`Index`] of the event's begin time,
//! and keeps each bucket as a key-ordered [`Collection`].
//!
//! The structure is persistent: [`add_event`](WindowedCollection::add_event)
//! returns a new snapshot together with the buckets it changed, and the
//! snapshot it was called on stays valid and unchanged. Snapshots share every
//! bucket they have in common.
//!
//! ## Example
//! ```
//! use ironpond::{AggregationSpec, BucketKey, Event, Index, Period, WindowOptions,
//!     WindowedCollection};
//! use ironpond::combiners::Sum;
//! use serde_json::json;
//!
//! let minute = 60_000;
//! let period = Period::minutes(30)?;
//! let empty = WindowedCollection::grouped(WindowOptions::new(period), "team", None)?;
//!
//! let (one, _) = empty.add_event(Event::at(5 * minute, json!({"team": "A", "score": 3})))?;
//! let (two, changed) = one.add_event(Event::at(20 * minute, json!({"team": "A", "score": 5})))?;
//! assert_eq!(changed.len(), 1);
//! assert_eq!(changed[0].1.len(), 2);
//! assert!(empty.is_empty());
//!
//! let key = BucketKey::new("A", Index::of(0, period));
//! assert_eq!(key.to_string(), "A::30m-0");
//! let sums = two.aggregate(&AggregationSpec::new().field("score", "score", Sum));
//! assert_eq!(sums[&key].get("score").and_then(|v| v.as_f64()), Some(8.0));
//! # Ok::<(), ironpond::Error>(())
//! ```

use crate::aggregation::AggregationSpec;
use crate::collection::{Collection, Slot};
use crate::error::{Error, Result};
use crate::event::Event;
use crate::grouping::{GroupSelector, NO_GROUP};
use crate::index::Index;
use crate::options::WindowOptions;
use crate::runner::{ExecMode, Runner};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, trace};

/* ===================== BucketKey ===================== */

/// Composite `(group, window)` key of one bucket. Text form: `"<group>::<index>"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BucketKey {
    group: String,
    index: Index,
}

impl BucketKey {
    pub fn new(group: impl Into<String>, index: Index) -> Self {
        Self {
            group: group.into(),
            index,
        }
    }

    /// Key of an ungrouped bucket.
    #[must_use]
    pub fn ungrouped(index: Index) -> Self {
        Self::new(NO_GROUP, index)
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub const fn index(&self) -> Index {
        self.index
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.group, self.index)
    }
}

impl FromStr for BucketKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Index text has no ':', so the last "::" always ends the group.
        let (group, index) = s
            .rsplit_once("::")
            .ok_or_else(|| Error::parse(s, "expected <group>::<index>"))?;
        Ok(Self::new(group, index.parse()?))
    }
}

impl TryFrom<String> for BucketKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BucketKey> for String {
    fn from(k: BucketKey) -> Self {
        k.to_string()
    }
}

/* ===================== WindowedCollection ===================== */

/// Buckets changed by one ingestion, with their updated contents.
pub type Changed = Vec<(BucketKey, Collection)>;

#[derive(Clone, Debug, Default)]
pub struct WindowedCollection {
    options: Option<WindowOptions>,
    selector: Option<GroupSelector>,
    buckets: BTreeMap<BucketKey, Collection>,
    next_ordinal: u64,
}

impl WindowedCollection {
    /// Wrap buckets that were already grouped and windowed upstream.
    ///
    /// Keys are kept exactly as given. The result has no windowing options, so
    /// it supports queries and aggregation but not [`add_event`](Self::add_event).
    #[must_use]
    pub fn from_buckets(buckets: BTreeMap<BucketKey, Collection>) -> Self {
        let mut next_ordinal = 0;
        let buckets = buckets
            .into_iter()
            .map(|(key, bucket)| {
                // Renumber so ordinals are unique across buckets.
                let slots = bucket
                    .slots()
                    .iter()
                    .map(|s| {
                        let slot = Slot {
                            ordinal: next_ordinal,
                            event: s.event.clone(),
                        };
                        next_ordinal += 1;
                        slot
                    })
                    .collect();
                (key, Collection::from_slots(slots))
            })
            .collect();
        Self {
            options: None,
            selector: None,
            buckets,
            next_ordinal,
        }
    }

    /// Window collections that were grouped upstream, one per group label.
    ///
    /// Every event of `groups[label]` lands in bucket `(label, index)`. The
    /// events are shared with `groups`, not copied.
    ///
    /// There is no selector, so the labels cannot be derived again from the
    /// events: [`bucket_keys`](Self::bucket_keys) and later
    /// [`add_event`](Self::add_event) calls use the empty label.
    #[must_use]
    pub fn with_groups(options: WindowOptions, groups: BTreeMap<String, Collection>) -> Self {
        let mut out = Self::empty(options, None);
        for (label, collection) in &groups {
            for slot in collection.slots() {
                let index = Index::of(slot.event.begin(), options.period);
                out.insert(vec![BucketKey::new(label.clone(), index)], slot.event.clone());
            }
        }
        debug!(groups = groups.len(), buckets = out.len(), "windowed pre-grouped collections");
        out
    }

    /// Window events by time only; every bucket uses the empty group label.
    ///
    /// # Errors
    /// Propagates errors from ingesting `initial`.
    pub fn new(options: WindowOptions, initial: Option<&Collection>) -> Result<Self> {
        Self::empty(options, None).ingest_all(initial)
    }

    /// Window events by time and group them with `selector`.
    ///
    /// # Errors
    /// Returns [`Error::MissingField`] when strict grouping is configured and
    /// an event of `initial` lacks a selected field.
    pub fn grouped(
        options: WindowOptions,
        selector: impl Into<GroupSelector>,
        initial: Option<&Collection>,
    ) -> Result<Self> {
        Self::empty(options, Some(selector.into())).ingest_all(initial)
    }

    fn empty(options: WindowOptions, selector: Option<GroupSelector>) -> Self {
        Self {
            options: Some(options),
            selector,
            buckets: BTreeMap::new(),
            next_ordinal: 0,
        }
    }

    fn ingest_all(self, initial: Option<&Collection>) -> Result<Self> {
        match initial {
            Some(events) => self.add_events(events.iter().cloned()),
            None => Ok(self),
        }
    }

    #[must_use]
    pub const fn options(&self) -> Option<&WindowOptions> {
        self.options.as_ref()
    }

    #[must_use]
    pub const fn selector(&self) -> Option<&GroupSelector> {
        self.selector.as_ref()
    }

    /// The bucket keys `event` would be filed under, one per group label.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] without windowing options and
    /// [`Error::MissingField`] from a strict selector.
    pub fn bucket_keys(&self, event: &Event) -> Result<Vec<BucketKey>> {
        let options = self.options.as_ref().ok_or_else(|| {
            Error::config("windowing options are required to add events to this collection")
        })?;
        let index = Index::of(event.begin(), options.period);
        let labels = match &self.selector {
            Some(selector) => selector.labels(event, options.strict_grouping)?,
            None => vec![NO_GROUP.to_string()],
        };
        Ok(labels
            .into_iter()
            .map(|label| BucketKey::new(label, index))
            .collect())
    }

    /// Ingest one event.
    ///
    /// Returns the new snapshot and every bucket that changed, with its
    /// updated contents. `self` is left untouched.
    ///
    /// # Errors
    /// As [`bucket_keys`](Self::bucket_keys); on error no snapshot changes.
    pub fn add_event(&self, event: Event) -> Result<(Self, Changed)> {
        let keys = self.bucket_keys(&event)?;
        let mut next = self.clone();
        let changed = next.insert(keys, Arc::new(event));
        Ok((next, changed))
    }

    /// Ingest events in order, returning the final snapshot.
    ///
    /// # Errors
    /// Stops at the first event that fails; `self` is left untouched.
    pub fn add_events<I: IntoIterator<Item = Event>>(&self, events: I) -> Result<Self> {
        let mut next = self.clone();
        for event in events {
            let keys = next.bucket_keys(&event)?;
            next.insert(keys, Arc::new(event));
        }
        Ok(next)
    }

    // Only ever called on a private copy, never on a published snapshot.
    fn insert(&mut self, keys: Vec<BucketKey>, event: Arc<Event>) -> Changed {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        trace!(ordinal, ts = event.begin(), buckets = keys.len(), "ingest event");

        let mut changed = Vec::with_capacity(keys.len());
        for key in keys {
            let slot = Slot {
                ordinal,
                event: event.clone(),
            };
            let updated = match self.buckets.entry(key.clone()) {
                Entry::Occupied(mut e) => {
                    let updated = e.get().append_slot(slot);
                    e.insert(updated.clone());
                    updated
                }
                Entry::Vacant(e) => {
                    debug!(bucket = %key, "open bucket");
                    e.insert(Collection::new().append_slot(slot)).clone()
                }
            };
            changed.push((key, updated));
        }
        changed
    }

    /// Look up one bucket.
    #[must_use]
    pub fn get(&self, key: &BucketKey) -> Option<&Collection> {
        self.buckets.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &BucketKey> {
        self.buckets.keys()
    }

    /// Whether the bucket has reached the configured trigger count.
    /// Unknown buckets are never ready.
    #[must_use]
    pub fn is_ready(&self, key: &BucketKey) -> bool {
        match (self.get(key), &self.options) {
            (Some(bucket), Some(options)) => options.is_ready(bucket),
            (Some(bucket), None) => !bucket.is_empty(),
            (None, _) => false,
        }
    }

    /// Keys of all buckets that satisfy [`is_ready`](Self::is_ready).
    #[must_use]
    pub fn ready_buckets(&self) -> Vec<BucketKey> {
        self.keys().filter(|k| self.is_ready(k)).cloned().collect()
    }

    /// Reduce every bucket into one summary event keyed by its window index.
    ///
    /// The result is keyed by the full bucket key, so buckets of different
    /// groups in the same window stay apart.
    #[must_use]
    pub fn aggregate(&self, spec: &AggregationSpec) -> BTreeMap<BucketKey, Event> {
        debug!(buckets = self.len(), fields = spec.len(), "aggregate");
        self.buckets
            .iter()
            .map(|(key, bucket)| (key.clone(), spec.apply(bucket, key.index())))
            .collect()
    }

    /// Like [`aggregate`](Self::aggregate), evaluating buckets with `mode`.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if a parallel pool cannot be built.
    pub fn aggregate_with(
        &self,
        spec: &AggregationSpec,
        mode: ExecMode,
    ) -> Result<BTreeMap<BucketKey, Event>> {
        debug!(buckets = self.len(), fields = spec.len(), ?mode, "aggregate");
        Runner::new(mode).run_map(&self.buckets, |key, bucket| spec.apply(bucket, key.index()))
    }

    /// Reduce every bucket and key the summaries by window index alone.
    ///
    /// # Errors
    /// Returns [`Error::IndexCollision`] when two groups have a bucket in the
    /// same window, since one of them would be lost.
    pub fn aggregate_by_index(&self, spec: &AggregationSpec) -> Result<BTreeMap<Index, Event>> {
        let mut out = BTreeMap::new();
        for (key, summary) in self.aggregate(spec) {
            match out.entry(key.index()) {
                Entry::Vacant(e) => {
                    e.insert(summary);
                }
                Entry::Occupied(_) => {
                    return Err(Error::IndexCollision {
                        index: key.index().to_string(),
                    });
                }
            }
        }
        Ok(out)
    }

    /// Every event in one key-ordered collection. Ties keep ingestion order,
    /// and an event filed under several groups appears once.
    #[must_use]
    pub fn flatten(&self) -> Collection {
        let mut seen = std::collections::HashSet::new();
        let slots: Vec<Slot> = self
            .buckets
            .values()
            .flat_map(Collection::slots)
            .filter(|s| seen.insert(s.ordinal))
            .cloned()
            .collect();
        Collection::from_slots(slots)
    }

    /// The raw bucket mapping.
    #[must_use]
    pub fn ungroup(&self) -> BTreeMap<BucketKey, Collection> {
        self.buckets.clone()
    }
}
