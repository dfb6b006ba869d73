//! Event records: an interval with identity, title and placement class.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Opaque identity assigned by whoever persists events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an event may be moved to resolve a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementClass {
    /// Committed obligation; moves only with explicit confirmation.
    Fixed,
    /// Schedulable work; relocated automatically around fixed events.
    Flexible,
}

impl PlacementClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementClass::Fixed => "fixed",
            PlacementClass::Flexible => "flexible",
        }
    }
}

impl fmt::Display for PlacementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for PlacementClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(PlacementClass::Fixed),
            "flexible" => Ok(PlacementClass::Flexible),
            other => Err(format!("unknown placement class: {other}")),
        }
    }
}

/// A calendar event, either committed to a schedule or proposed as a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    id: Option<EventId>,
    title: String,
    #[serde(default)]
    description: String,
    interval: Interval,
    class: PlacementClass,
}

impl EventRecord {
    pub fn new(title: impl Into<String>, interval: Interval, class: PlacementClass) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            interval,
            class,
        }
    }

    pub fn fixed(title: impl Into<String>, interval: Interval) -> Self {
        Self::new(title, interval, PlacementClass::Fixed)
    }

    pub fn flexible(title: impl Into<String>, interval: Interval) -> Self {
        Self::new(title, interval, PlacementClass::Flexible)
    }

    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> Option<&EventId> {
        self.id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn class(&self) -> PlacementClass {
        self.class
    }

    pub fn is_fixed(&self) -> bool {
        self.class == PlacementClass::Fixed
    }

    /// A copy of this record occupying `interval` instead.
    pub fn relocated_to(&self, interval: Interval) -> EventRecord {
        EventRecord {
            interval,
            ..self.clone()
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.interval, self.class)
    }
}
