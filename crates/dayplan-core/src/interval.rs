//! Half-open time intervals.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A time range `[start, end)` with `start < end`.
///
/// Anchored to a calendar date so that an interval can end at midnight
/// of the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawInterval> for Interval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Create an interval, rejecting zero-length and inverted ranges.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Caller guarantees `start < end`.
    pub(crate) fn ordered(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Two intervals overlap iff each starts before the other ends.
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, point: NaiveDateTime) -> bool {
        self.start <= point && point < self.end
    }

    /// Same duration, moved to begin at `start`.
    pub fn starting_at(&self, start: NaiveDateTime) -> Interval {
        Interval::ordered(start, start + self.duration())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = if self.end.date() > self.start.date() && self.end.time() == chrono::NaiveTime::MIN {
            "24:00".to_string()
        } else {
            self.end.format("%H:%M").to_string()
        };
        write!(f, "{}-{}", self.start.format("%H:%M"), end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> Interval {
        Interval::new(at(sh, sm), at(eh, em)).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted() {
        assert!(matches!(
            Interval::new(at(10, 0), at(10, 0)),
            Err(ValidationError::InvalidInterval { .. })
        ));
        assert!(Interval::new(at(11, 0), at(10, 0)).is_err());
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let a = iv(9, 0, 10, 0);
        let b = iv(10, 0, 11, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn partial_and_nested_overlap() {
        let work = iv(11, 0, 13, 0);
        assert!(work.overlaps(&iv(12, 30, 14, 0)));
        assert!(work.overlaps(&iv(11, 30, 12, 0)));
        assert!(iv(8, 0, 18, 0).overlaps(&work));
    }

    #[test]
    fn duration_and_shift() {
        let a = iv(11, 0, 12, 15);
        assert_eq!(a.duration(), Duration::minutes(75));
        let moved = a.starting_at(at(13, 0));
        assert_eq!(moved, iv(13, 0, 14, 15));
        assert!(moved.contains(at(13, 0)));
        assert!(!moved.contains(at(14, 15)));
    }

    #[test]
    fn display_renders_midnight_as_24() {
        let next = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let late = Interval::new(at(22, 0), next).unwrap();
        assert_eq!(late.to_string(), "22:00-24:00");
        assert_eq!(iv(9, 5, 10, 0).to_string(), "09:05-10:00");
    }

    #[test]
    fn deserialize_revalidates() {
        let ok: Interval =
            serde_json::from_str(r#"{"start":"2025-04-07T09:00:00","end":"2025-04-07T10:00:00"}"#)
                .unwrap();
        assert_eq!(ok, iv(9, 0, 10, 0));
        let bad = serde_json::from_str::<Interval>(
            r#"{"start":"2025-04-07T10:00:00","end":"2025-04-07T09:00:00"}"#,
        );
        assert!(bad.is_err());
    }
}
