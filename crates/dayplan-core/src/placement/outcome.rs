use std::fmt;

use serde::Serialize;

use crate::error::GateError;
use crate::event::EventRecord;
use crate::interval::Interval;

/// Terminal state of one placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementState {
    Accepted,
    Rejected,
    Relocated,
}

/// Why a candidate was not committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// No free gap large enough for a flexible candidate within the day bounds.
    NoCapacity,
    /// The confirmation gate refused to override fixed-event conflicts.
    ConfirmationDenied { conflicts: Vec<EventRecord> },
    /// The gate gave no answer; treated the same as a refusal.
    ConfirmationUnavailable {
        conflicts: Vec<EventRecord>,
        #[serde(serialize_with = "serialize_display")]
        cause: GateError,
    },
}

impl Rejection {
    /// Fixed events that blocked the candidate, if any.
    pub fn conflicts(&self) -> &[EventRecord] {
        match self {
            Rejection::NoCapacity => &[],
            Rejection::ConfirmationDenied { conflicts }
            | Rejection::ConfirmationUnavailable { conflicts, .. } => conflicts,
        }
    }
}

fn serialize_display<S: serde::Serializer>(value: &GateError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// The decision of the placement engine for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Placement {
    /// Committed as requested. `overridden` lists fixed events the gate
    /// allowed the candidate to overlap.
    Accepted {
        event: EventRecord,
        overridden: Vec<EventRecord>,
    },
    /// Committed at a different interval with the same duration.
    Relocated {
        event: EventRecord,
        requested: Interval,
    },
    /// Not committed; the schedule is unchanged.
    Rejected {
        candidate: EventRecord,
        reason: Rejection,
    },
}

impl Placement {
    pub fn state(&self) -> PlacementState {
        match self {
            Placement::Accepted { .. } => PlacementState::Accepted,
            Placement::Relocated { .. } => PlacementState::Relocated,
            Placement::Rejected { .. } => PlacementState::Rejected,
        }
    }

    /// The record that was committed, if any.
    pub fn committed(&self) -> Option<&EventRecord> {
        match self {
            Placement::Accepted { event, .. } | Placement::Relocated { event, .. } => Some(event),
            Placement::Rejected { .. } => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        self.committed().is_some()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Accepted { event, overridden } if overridden.is_empty() => {
                write!(f, "'{}' added at {}", event.title(), event.interval())
            }
            Placement::Accepted { event, overridden } => write!(
                f,
                "'{}' added at {} overlapping {} fixed event(s) by confirmation",
                event.title(),
                event.interval(),
                overridden.len()
            ),
            Placement::Relocated { event, requested } => write!(
                f,
                "'{}' moved from {} to {}",
                event.title(),
                requested,
                event.interval()
            ),
            Placement::Rejected { candidate, reason } => {
                write!(f, "'{}' was not added: ", candidate.title())?;
                match reason {
                    Rejection::NoCapacity => f.write_str("no free interval is long enough"),
                    Rejection::ConfirmationDenied { .. } => {
                        write!(f, "overlaps {}", titles(reason.conflicts()))
                    }
                    Rejection::ConfirmationUnavailable { cause, .. } => {
                        write!(f, "overlaps {} and {cause}", titles(reason.conflicts()))
                    }
                }
            }
        }
    }
}

fn titles(events: &[EventRecord]) -> String {
    events
        .iter()
        .map(|e| format!("'{}' ({})", e.title(), e.interval()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn iv(sh: u32, eh: u32) -> Interval {
        let day = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        Interval::new(
            day.and_hms_opt(sh, 0, 0).unwrap(),
            day.and_hms_opt(eh, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn relocation_reports_old_and_new_interval() {
        let placement = Placement::Relocated {
            event: EventRecord::flexible("Study", iv(13, 14)),
            requested: iv(11, 12),
        };
        assert_eq!(placement.to_string(), "'Study' moved from 11:00-12:00 to 13:00-14:00");
        assert_eq!(placement.state(), PlacementState::Relocated);
        assert!(placement.is_committed());
    }

    #[test]
    fn denial_names_conflicts() {
        let placement = Placement::Rejected {
            candidate: EventRecord::fixed("Meeting", iv(12, 14)),
            reason: Rejection::ConfirmationDenied {
                conflicts: vec![EventRecord::fixed("Work", iv(11, 13))],
            },
        };
        assert_eq!(
            placement.to_string(),
            "'Meeting' was not added: overlaps 'Work' (11:00-13:00)"
        );
        assert!(placement.committed().is_none());
    }

    #[test]
    fn rejection_exposes_blocking_events() {
        let work = EventRecord::fixed("Work", iv(11, 13));
        let unavailable = Rejection::ConfirmationUnavailable {
            conflicts: vec![work.clone()],
            cause: GateError::Disconnected,
        };
        assert_eq!(unavailable.conflicts(), &[work][..]);
        assert!(Rejection::NoCapacity.conflicts().is_empty());

        let placement = Placement::Rejected {
            candidate: EventRecord::fixed("Meeting", iv(12, 14)),
            reason: unavailable,
        };
        assert_eq!(
            placement.to_string(),
            "'Meeting' was not added: overlaps 'Work' (11:00-13:00) and confirmation input closed"
        );
    }

    #[test]
    fn serializes_with_state_tag() {
        let placement = Placement::Rejected {
            candidate: EventRecord::flexible("Study", iv(11, 12)),
            reason: Rejection::NoCapacity,
        };
        let json = serde_json::to_value(&placement).unwrap();
        assert_eq!(json["state"], "rejected");
        assert_eq!(json["reason"]["kind"], "no_capacity");
    }
}
