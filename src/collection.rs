//! Persistent, key-ordered event collections.
//!
//! A [`Collection`] keeps its events sorted by [`Key`](crate::Key). It never
//! changes after construction: [`append`](Collection::append) and
//! [`merge`](Collection::merge) return a new collection and leave the receiver
//! untouched. Clones are cheap (one `Arc` bump), which is what lets windowed
//! snapshots share every bucket they did not modify. Events are held behind
//! their own `Arc`, so a new collection copies pointers, never payloads.
//!
//! Events with equal keys keep their insertion order.

use crate::event::Event;
use crate::time::TimeRange;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// An event tagged with its position in the ingestion sequence.
#[derive(Clone, Debug)]
pub(crate) struct Slot {
    pub(crate) ordinal: u64,
    pub(crate) event: Arc<Event>,
}

#[derive(Clone, Debug, Default)]
pub struct Collection {
    slots: Arc<Vec<Slot>>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from events in any order; the result is key-sorted
    /// and ties keep the order given.
    #[must_use]
    pub fn from_events<I: IntoIterator<Item = Event>>(events: I) -> Self {
        let slots = events
            .into_iter()
            .enumerate()
            .map(|(i, event)| Slot {
                ordinal: i as u64,
                event: Arc::new(event),
            })
            .collect();
        Self::from_slots(slots)
    }

    pub(crate) fn from_slots(mut slots: Vec<Slot>) -> Self {
        // stable: equal keys keep their relative order
        slots.sort_by(|a, b| a.event.key().cmp(b.event.key()).then(a.ordinal.cmp(&b.ordinal)));
        Self {
            slots: Arc::new(slots),
        }
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// A new collection with `event` inserted after every event whose key is
    /// less than or equal to its own.
    #[must_use]
    pub fn append(&self, event: Event) -> Self {
        let ordinal = self.slots.iter().map(|s| s.ordinal + 1).max().unwrap_or(0);
        self.append_slot(Slot {
            ordinal,
            event: Arc::new(event),
        })
    }

    pub(crate) fn append_slot(&self, slot: Slot) -> Self {
        let pos = self
            .slots
            .partition_point(|s| s.event.key() <= slot.event.key());
        let mut slots = Vec::with_capacity(self.slots.len() + 1);
        slots.extend_from_slice(&self.slots[..pos]);
        slots.push(slot);
        slots.extend_from_slice(&self.slots[pos..]);
        Self {
            slots: Arc::new(slots),
        }
    }

    /// Merge two collections into one key-ordered collection. On equal keys
    /// events from `self` come first.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut out = Vec::with_capacity(self.len() + other.len());
        let (mut a, mut b) = (self.slots.iter().peekable(), other.slots.iter().peekable());
        loop {
            let take_left = match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => x.event.key() <= y.event.key(),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_left { a.next() } else { b.next() };
            if let Some(slot) = next {
                out.push(slot.clone());
            }
        }
        // Renumber so ordinals stay unique within the merged result.
        for (i, slot) in out.iter_mut().enumerate() {
            slot.ordinal = i as u64;
        }
        Self {
            slots: Arc::new(out),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Events in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Event> + '_ {
        self.slots.iter().map(|s| s.event.as_ref())
    }

    #[must_use]
    pub fn at(&self, pos: usize) -> Option<&Event> {
        self.slots.get(pos).map(|s| s.event.as_ref())
    }

    #[must_use]
    pub fn first(&self) -> Option<&Event> {
        self.slots.first().map(|s| s.event.as_ref())
    }

    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.slots.last().map(|s| s.event.as_ref())
    }

    /// Events cloned out in key order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Event> {
        self.iter().cloned().collect()
    }

    /// The span from the earliest begin to the latest end, if non-empty.
    #[must_use]
    pub fn time_range(&self) -> Option<TimeRange> {
        let begin = self.slots.first()?.event.begin();
        let end = self.iter().map(Event::end).max()?;
        Some(TimeRange::new(begin, end))
    }

    /// Values of `field` for every event, `None` where the field is missing.
    pub fn values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = Option<&'a serde_json::Value>> + 'a {
        self.iter().map(move |e| e.get(field))
    }

    /// Two collections share storage (no copy happened between them).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}

// Equality is over the events only; ingestion ordinals are bookkeeping.
impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl FromIterator<Event> for Collection {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::from_events(iter)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Event;
    type IntoIter = Box<dyn Iterator<Item = &'a Event> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Event>::deserialize(deserializer).map(Self::from_events)
    }
}
