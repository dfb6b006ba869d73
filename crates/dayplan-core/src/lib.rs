//! # dayplan Core Library
//!
//! Decides how a proposed calendar event is placed against the committed
//! events of one day. The library does no I/O beyond its own configuration
//! file: callers load a [`Schedule`], hand a candidate [`EventRecord`] to the
//! [`PlacementEngine`], and persist whatever the returned [`Placement`] says.
//!
//! ## Key Components
//!
//! - [`Interval`]: half-open time range, the unit of overlap detection
//! - [`EventRecord`]: an interval with title and [`PlacementClass`]
//! - [`Schedule`]: one day's committed events with overlap and free-gap queries
//! - [`PlacementEngine`]: accept, reject, confirm or relocate a candidate
//! - [`ConfirmationGate`]: who resolves fixed-event conflicts
//!   ([`PolicyGate`], [`InteractiveGate`])
//! - [`DayLocks`]: one placement in flight per day
//! - [`Config`]: TOML configuration (day bounds, confirmation timeout)

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod gate;
pub mod interval;
pub mod locks;
pub mod placement;
pub mod schedule;

pub use clock::{DayBounds, TimeOfDay};
pub use config::{data_dir, Config};
pub use error::{ConfigError, CoreError, GateError, Result, ValidationError};
pub use event::{EventId, EventRecord, PlacementClass};
pub use gate::{ConfirmationGate, ConfirmationRequest, Decision, InteractiveGate, PolicyGate};
pub use interval::Interval;
pub use locks::{DayGuard, DayLocks};
pub use placement::{Placement, PlacementEngine, PlacementState, Rejection};
pub use schedule::{ClassFilter, FreeIntervals, Schedule};
