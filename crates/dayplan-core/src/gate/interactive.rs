//! Blocking yes/no confirmation from a human operator.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use super::{ConfirmationGate, ConfirmationRequest, Decision};
use crate::error::GateError;

/// Asks on `prompt` and waits for a line of input.
///
/// Input is read on a background thread so that a pending question can time
/// out. Timeouts and closed input fail closed. Lines that arrive for a
/// question that already timed out are discarded before the next prompt.
pub struct InteractiveGate<W> {
    answers: Receiver<String>,
    prompt: W,
    timeout: Option<Duration>,
    abandoned: bool,
}

impl<W: Write> InteractiveGate<W> {
    pub fn new<R>(input: R, prompt: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("confirm-input".to_string())
            .spawn(move || forward_lines(input, tx));
        if let Err(e) = spawned {
            // The sender died with the closure, so every confirm reports Disconnected.
            tracing::warn!(error = %e, "failed to start confirmation input thread");
        }

        Self {
            answers: rx,
            prompt,
            timeout: None,
            abandoned: false,
        }
    }

    /// Give up on an unanswered question after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn prompt(&self) -> &W {
        &self.prompt
    }

    pub fn into_prompt(self) -> W {
        self.prompt
    }

    /// Drop answers meant for a question that timed out.
    fn discard_late_answers(&mut self) {
        if !self.abandoned {
            return;
        }
        let mut discarded = 0usize;
        while self.answers.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::debug!(discarded, "dropped answers to an abandoned question");
        }
        self.abandoned = false;
    }

    fn write_prompt(&mut self, request: &ConfirmationRequest<'_>) -> io::Result<()> {
        writeln!(
            self.prompt,
            "Warning: '{}' ({}) overlaps existing fixed event(s):",
            request.candidate.title(),
            request.candidate.interval()
        )?;
        for conflict in request.conflicts {
            writeln!(self.prompt, "  - {} ({})", conflict.title(), conflict.interval())?;
        }
        write!(self.prompt, "Do you want to proceed? (yes/no): ")?;
        self.prompt.flush()
    }
}

impl InteractiveGate<io::Stderr> {
    /// Read answers from stdin, prompt on stderr.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stderr())
    }
}

impl<W: Write> ConfirmationGate for InteractiveGate<W> {
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<Decision, GateError> {
        self.discard_late_answers();
        self.write_prompt(request)
            .map_err(|e| GateError::Prompt(e.to_string()))?;

        let answer = match self.timeout {
            Some(timeout) => self.answers.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => {
                    self.abandoned = true;
                    GateError::TimedOut(timeout)
                }
                RecvTimeoutError::Disconnected => GateError::Disconnected,
            })?,
            None => self.answers.recv().map_err(|_| GateError::Disconnected)?,
        };

        Ok(Decision::from_answer(&answer))
    }
}

fn forward_lines<R: BufRead>(input: R, answers: Sender<String>) {
    for line in input.lines() {
        let Ok(line) = line else {
            return;
        };
        if answers.send(line).is_err() {
            return;
        }
    }
}
