//! Fixed local clock: times of day and the daily placement window.
//!
//! All times are wall-clock minutes on a single day with no timezone.
//! `24:00` is accepted as the end-of-day sentinel so that a window can
//! reach midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::Interval;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute resolution, `00:00` through `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Build from hour and minute. `24:00` is the only valid time with hour 24.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        let valid = (hour < 24 && minute < 60) || (hour == 24 && minute == 0);
        if !valid {
            return Err(ValidationError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Parse loose user input: `9`, `11`, `1130`, `9:30` or `11:30`.
    ///
    /// Without a colon a single digit is an hour and anything longer is
    /// right-padded with zeros to `HHMM`. With a colon the hour part is
    /// left-padded to two digits and the minute part right-padded.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTime(input.to_string());

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let (hour, minute) = match trimmed.split_once(':') {
            Some((hour, minute)) => {
                if hour.is_empty() || hour.len() > 2 || minute.len() > 2 {
                    return Err(invalid());
                }
                (format!("{hour:0>2}"), format!("{minute:0<2}"))
            }
            None if trimmed.len() == 1 => (format!("0{trimmed}"), "00".to_string()),
            None => {
                let digits = format!("{trimmed:0<4}");
                if digits.len() != 4 || !digits.is_char_boundary(2) {
                    return Err(invalid());
                }
                (digits[..2].to_string(), digits[2..].to_string())
            }
        };

        if !hour.chars().chain(minute.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// The instant this time denotes on `date`. `24:00` is the next midnight.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(self.0))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// The window of a day in which flexible events may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl DayBounds {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidDayBounds {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// `00:00` to `24:00`.
    pub fn full_day() -> Self {
        Self {
            start: TimeOfDay::MIDNIGHT,
            end: TimeOfDay::END_OF_DAY,
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// The window as a concrete interval on `date`.
    pub fn on(&self, date: NaiveDate) -> Interval {
        Interval::ordered(self.start.on(date), self.end.on(date))
    }
}

impl Default for DayBounds {
    fn default() -> Self {
        Self::full_day()
    }
}

impl fmt::Display for DayBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
