//! The committed events of one day.
//!
//! A [`Schedule`] is a passive container: it keeps its events sorted by
//! start time and answers overlap and free-time queries, but never checks
//! conflicts on insertion. That is the placement engine's job.

mod free;

pub use free::FreeIntervals;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::clock::DayBounds;
use crate::event::{EventRecord, PlacementClass};
use crate::interval::Interval;

/// Which placement classes a conflict query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassFilter {
    Fixed,
    Flexible,
    Any,
}

impl ClassFilter {
    pub fn matches(&self, class: PlacementClass) -> bool {
        match self {
            ClassFilter::Fixed => class == PlacementClass::Fixed,
            ClassFilter::Flexible => class == PlacementClass::Flexible,
            ClassFilter::Any => true,
        }
    }
}

/// Committed events for a single day, sorted by interval start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    date: NaiveDate,
    events: Vec<EventRecord>,
}

impl Schedule {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
        }
    }

    /// Build from already-committed events, e.g. loaded from storage.
    pub fn from_events(date: NaiveDate, events: impl IntoIterator<Item = EventRecord>) -> Self {
        let mut events: Vec<EventRecord> = events.into_iter().collect();
        events.sort_by_key(|e| e.interval().start());
        Self { date, events }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<EventRecord> {
        self.events
    }

    /// Committed events of the given class overlapping `candidate`.
    pub fn conflicts_with<'a>(
        &'a self,
        candidate: &Interval,
        filter: ClassFilter,
    ) -> impl Iterator<Item = &'a EventRecord> + 'a {
        let candidate = *candidate;
        self.events
            .iter()
            .take_while(move |e| e.interval().start() < candidate.end())
            .filter(move |e| filter.matches(e.class()) && e.interval().overlaps(&candidate))
    }

    /// Gaps between fixed events of at least `min_duration`, earliest first.
    ///
    /// Gaps are clipped to `bounds` on this schedule's date and to begin no
    /// earlier than `point`.
    pub fn free_intervals_on_or_after(
        &self,
        point: NaiveDateTime,
        min_duration: Duration,
        bounds: DayBounds,
    ) -> FreeIntervals<'_> {
        let window = bounds.on(self.date);
        FreeIntervals::new(&self.events, point.max(window.start()), window.end(), min_duration)
    }

    /// Every free gap within `bounds`.
    pub fn free_intervals(&self, bounds: DayBounds) -> FreeIntervals<'_> {
        self.free_intervals_on_or_after(bounds.start().on(self.date), Duration::zero(), bounds)
    }

    /// Insert keeping start order; equal starts keep insertion order.
    pub fn insert(&mut self, event: EventRecord) {
        let start = event.interval().start();
        let at = self.events.partition_point(|e| e.interval().start() <= start);
        self.events.insert(at, event);
    }
}
