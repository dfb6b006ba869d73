//! Confirmation gates: who decides whether a fixed-event conflict is overridden.
//!
//! The placement engine consults a gate exactly once per conflicting fixed
//! candidate. A gate answers [`Decision::Proceed`] or [`Decision::Abort`], or
//! fails with a [`GateError`], which the engine treats as an abort.
//!
//! - [`PolicyGate`]: deterministic predicate supplied by the caller, for batch
//!   callers and tests.
//! - [`InteractiveGate`]: asks a human and blocks until answered, the answer
//!   times out, or the input closes. Only suitable for single-operator use.

mod interactive;

pub use interactive::InteractiveGate;

use serde::{Deserialize, Serialize};

use crate::error::GateError;
use crate::event::EventRecord;

/// Outcome of a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Proceed,
    Abort,
}

impl Decision {
    /// Interpret a typed answer. Only `yes` proceeds.
    pub fn from_answer(answer: &str) -> Decision {
        if answer.trim() == "yes" {
            Decision::Proceed
        } else {
            Decision::Abort
        }
    }
}

/// What the gate is asked to decide on.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationRequest<'a> {
    pub candidate: &'a EventRecord,
    pub conflicts: &'a [EventRecord],
}

/// Resolves a detected conflict with fixed events.
///
/// Implementations must not retry internally and must fail closed: an
/// abandoned or unreachable confirmation is an error, never `Proceed`.
pub trait ConfirmationGate {
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<Decision, GateError>;
}

impl<G: ConfirmationGate + ?Sized> ConfirmationGate for &mut G {
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<Decision, GateError> {
        (**self).confirm(request)
    }
}

/// Gate driven by a caller-supplied predicate over (candidate, conflicts).
pub struct PolicyGate<F> {
    policy: F,
}

impl<F> PolicyGate<F>
where
    F: FnMut(&EventRecord, &[EventRecord]) -> Decision,
{
    pub fn new(policy: F) -> Self {
        Self { policy }
    }
}

impl PolicyGate<fn(&EventRecord, &[EventRecord]) -> Decision> {
    /// Gate that always answers `decision`.
    pub fn always(decision: Decision) -> PolicyGate<impl FnMut(&EventRecord, &[EventRecord]) -> Decision> {
        PolicyGate::new(move |_: &EventRecord, _: &[EventRecord]| decision)
    }
}

impl<F> ConfirmationGate for PolicyGate<F>
where
    F: FnMut(&EventRecord, &[EventRecord]) -> Decision,
{
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<Decision, GateError> {
        Ok((self.policy)(request.candidate, request.conflicts))
    }
}

impl<F> std::fmt::Debug for PolicyGate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyGate").finish_non_exhaustive()
    }
}
