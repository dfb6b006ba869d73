//! Per-day serialization of placement attempts.
//!
//! Evaluating a placement reads the schedule and then writes it, so two
//! attempts for the same day must not interleave. Different days are
//! independent.

use std::collections::HashSet;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

/// Registry of days with a placement in flight.
#[derive(Debug, Default)]
pub struct DayLocks {
    busy: Mutex<HashSet<NaiveDate>>,
    released: Condvar,
}

impl DayLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `date` is free, then claim it.
    ///
    /// Hold the guard for the whole load, evaluate, save sequence, including
    /// any interactive confirmation.
    pub fn lock(&self, date: NaiveDate) -> DayGuard<'_> {
        let mut busy = self.busy();
        while busy.contains(&date) {
            busy = self
                .released
                .wait(busy)
                .unwrap_or_else(PoisonError::into_inner);
        }
        busy.insert(date);
        tracing::trace!(%date, "day locked");
        DayGuard { locks: self, date }
    }

    /// Claim `date` only if nobody holds it.
    pub fn try_lock(&self, date: NaiveDate) -> Option<DayGuard<'_>> {
        let mut busy = self.busy();
        if !busy.insert(date) {
            return None;
        }
        Some(DayGuard { locks: self, date })
    }

    pub fn is_locked(&self, date: NaiveDate) -> bool {
        self.busy().contains(&date)
    }

    fn busy(&self) -> MutexGuard<'_, HashSet<NaiveDate>> {
        // The set is only mutated by single inserts and removes.
        self.busy.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive claim on one day. Released on drop.
#[derive(Debug)]
pub struct DayGuard<'a> {
    locks: &'a DayLocks,
    date: NaiveDate,
}

impl DayGuard<'_> {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Drop for DayGuard<'_> {
    fn drop(&mut self) {
        self.locks.busy().remove(&self.date);
        self.locks.released.notify_all();
        tracing::trace!(date = %self.date, "day unlocked");
    }
}
