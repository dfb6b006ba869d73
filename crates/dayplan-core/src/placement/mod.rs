//! Placement engine: decides how a candidate event lands on a day's schedule.
//!
//! A single evaluation moves `Evaluating -> {Accepted, Rejected, Relocated}`,
//! optionally pausing in `AwaitingConfirmation` when a fixed candidate
//! collides with committed fixed events. Only fixed events ever block.
//!
//! | candidate | fixed conflicts | result                                   |
//! |-----------|-----------------|------------------------------------------|
//! | fixed     | none            | accepted                                 |
//! | fixed     | some            | gate proceed: accepted, abort: rejected  |
//! | flexible  | none            | accepted                                 |
//! | flexible  | some            | relocated to earliest gap, or no capacity|

mod outcome;

pub use outcome::{Placement, PlacementState, Rejection};

use chrono::Duration;

use crate::clock::DayBounds;
use crate::error::ValidationError;
use crate::event::{EventRecord, PlacementClass};
use crate::gate::{ConfirmationGate, ConfirmationRequest, Decision};
use crate::schedule::{ClassFilter, Schedule};

/// Evaluates candidates against a schedule within fixed day bounds.
///
/// The engine itself is stateless; callers must serialize evaluations per
/// day (see [`crate::DayLocks`]) because each call reads then writes the
/// schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine {
    bounds: DayBounds,
}

impl PlacementEngine {
    pub fn new(bounds: DayBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> DayBounds {
        self.bounds
    }

    /// Evaluate `candidate` and apply the decision to `schedule`.
    ///
    /// The candidate is never modified; a relocated placement carries a new
    /// record. On rejection the schedule is left untouched.
    ///
    /// # Errors
    /// Returns [`ValidationError::OutsideDay`] if the candidate does not
    /// fall on the schedule's date.
    pub fn place(
        &self,
        candidate: &EventRecord,
        schedule: &mut Schedule,
        gate: &mut dyn ConfirmationGate,
    ) -> Result<Placement, ValidationError> {
        self.validate(candidate, schedule)?;

        let interval = candidate.interval();
        tracing::debug!(
            title = candidate.title(),
            interval = %interval,
            class = %candidate.class(),
            date = %schedule.date(),
            "evaluating placement"
        );

        let conflicts: Vec<EventRecord> = schedule
            .conflicts_with(interval, ClassFilter::Fixed)
            .cloned()
            .collect();

        let placement = if conflicts.is_empty() {
            schedule.insert(candidate.clone());
            Placement::Accepted {
                event: candidate.clone(),
                overridden: Vec::new(),
            }
        } else {
            match candidate.class() {
                PlacementClass::Fixed => Self::confirm(candidate, conflicts, schedule, gate),
                PlacementClass::Flexible => self.relocate(candidate, schedule),
            }
        };

        tracing::info!(
            title = candidate.title(),
            state = ?placement.state(),
            "{placement}"
        );
        Ok(placement)
    }

    fn validate(&self, candidate: &EventRecord, schedule: &Schedule) -> Result<(), ValidationError> {
        let interval = candidate.interval();
        let day = DayBounds::full_day().on(schedule.date());
        if interval.start() < day.start() || interval.end() > day.end() {
            return Err(ValidationError::OutsideDay {
                date: schedule.date(),
                interval: format!("{} to {}", interval.start(), interval.end()),
            });
        }
        Ok(())
    }

    fn confirm(
        candidate: &EventRecord,
        conflicts: Vec<EventRecord>,
        schedule: &mut Schedule,
        gate: &mut dyn ConfirmationGate,
    ) -> Placement {
        tracing::debug!(
            title = candidate.title(),
            conflicts = conflicts.len(),
            "awaiting confirmation"
        );

        let request = ConfirmationRequest {
            candidate,
            conflicts: &conflicts,
        };
        match gate.confirm(&request) {
            Ok(Decision::Proceed) => {
                schedule.insert(candidate.clone());
                Placement::Accepted {
                    event: candidate.clone(),
                    overridden: conflicts,
                }
            }
            Ok(Decision::Abort) => Placement::Rejected {
                candidate: candidate.clone(),
                reason: Rejection::ConfirmationDenied { conflicts },
            },
            Err(cause) => {
                tracing::warn!(title = candidate.title(), error = %cause, "confirmation unavailable");
                Placement::Rejected {
                    candidate: candidate.clone(),
                    reason: Rejection::ConfirmationUnavailable { conflicts, cause },
                }
            }
        }
    }

    fn relocate(&self, candidate: &EventRecord, schedule: &mut Schedule) -> Placement {
        let requested = *candidate.interval();
        let duration: Duration = requested.duration();

        let gap = schedule
            .free_intervals_on_or_after(requested.start(), duration, self.bounds)
            .next();

        match gap {
            Some(gap) => {
                let event = candidate.relocated_to(requested.starting_at(gap.start()));
                schedule.insert(event.clone());
                Placement::Relocated { event, requested }
            }
            None => Placement::Rejected {
                candidate: candidate.clone(),
                reason: Rejection::NoCapacity,
            },
        }
    }
}
