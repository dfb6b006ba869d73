//! Lazy free-interval sweep over a sorted event list.

use std::iter::FusedIterator;
use std::slice;

use chrono::{Duration, NaiveDateTime};

use crate::event::EventRecord;
use crate::interval::Interval;

/// Maximal gaps between fixed events, produced in start order.
///
/// Created by [`crate::Schedule::free_intervals_on_or_after`].
#[derive(Debug, Clone)]
pub struct FreeIntervals<'a> {
    events: slice::Iter<'a, EventRecord>,
    cursor: NaiveDateTime,
    window_end: NaiveDateTime,
    min_duration: Duration,
    done: bool,
}

impl<'a> FreeIntervals<'a> {
    pub(super) fn new(
        events: &'a [EventRecord],
        cursor: NaiveDateTime,
        window_end: NaiveDateTime,
        min_duration: Duration,
    ) -> Self {
        Self {
            events: events.iter(),
            cursor,
            window_end,
            min_duration,
            done: cursor >= window_end,
        }
    }

    /// The gap `[cursor, until)` if it is long enough.
    fn gap_until(&self, until: NaiveDateTime) -> Option<Interval> {
        let until = until.min(self.window_end);
        if until <= self.cursor || until - self.cursor < self.min_duration {
            return None;
        }
        Some(Interval::ordered(self.cursor, until))
    }
}

impl Iterator for FreeIntervals<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        if self.done {
            return None;
        }

        while let Some(event) = self.events.next() {
            if !event.is_fixed() {
                continue;
            }
            let busy = event.interval();
            if busy.end() <= self.cursor {
                continue;
            }
            if busy.start() >= self.window_end {
                break;
            }

            let gap = self.gap_until(busy.start());
            self.cursor = self.cursor.max(busy.end());
            if self.cursor >= self.window_end {
                self.done = true;
            }
            if gap.is_some() {
                return gap;
            }
            if self.done {
                return None;
            }
        }

        self.done = true;
        self.gap_until(self.window_end)
    }
}

impl FusedIterator for FreeIntervals<'_> {}
