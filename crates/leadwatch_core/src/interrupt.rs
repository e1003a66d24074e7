//! Interrupt detection and the human-in-the-loop resolution state machine.
//!
//! The remote job writes [`ACTION_REQUIRED_SENTINEL`] into its log when it is
//! blocked on a verification code. The line keeps reappearing on every poll
//! until the job consumes a code, so detection alone is not enough: the
//! [`InterruptResolution`] owns the "prompt outstanding" flag and refuses to
//! start a second prompt while one is pending.
//!
//! Matching is a raw, case-sensitive substring check over the joined log text.
//! A line from an unrelated run that happens to contain the sentinel will also
//! trigger a prompt.

use crate::LogSnapshot;

/// Substring the remote job logs when it needs a verification code.
pub const ACTION_REQUIRED_SENTINEL: &str = "ACTION REQUIRED";

/// Returns true when any part of the snapshot contains the sentinel.
pub fn detect(snapshot: &LogSnapshot) -> bool {
    snapshot.joined().contains(ACTION_REQUIRED_SENTINEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionState {
    #[default]
    Idle,
    /// Waiting for the human to supply (or decline) a code.
    Prompting,
    /// A code was supplied and is being sent to the resume endpoint.
    Submitting,
}

/// Single owner of the interrupt flag.
///
/// Transitions: `Idle -> Prompting -> Submitting -> Idle`, or
/// `Prompting -> Idle` when the human declines. The flag is raised on entry to
/// `Prompting` and cleared on every return to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterruptResolution {
    state: ResolutionState,
    prompts_started: u32,
}

impl InterruptResolution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    /// The interrupt flag: true while a prompt or its submission is outstanding.
    pub fn is_outstanding(&self) -> bool {
        self.state != ResolutionState::Idle
    }

    /// Number of prompts started over the lifetime of this flow.
    pub fn prompts_started(&self) -> u32 {
        self.prompts_started
    }

    /// Starts a prompt if `detected` and nothing is outstanding.
    ///
    /// Returns true when the caller must solicit input. The flag is raised
    /// before any interaction happens.
    pub(crate) fn begin(&mut self, detected: bool) -> bool {
        if !detected || self.is_outstanding() {
            return false;
        }
        self.state = ResolutionState::Prompting;
        self.prompts_started += 1;
        true
    }

    /// Accepts the human's answer to an outstanding prompt.
    ///
    /// Returns the trimmed code to submit, or `None` when the input was empty
    /// or absent (the prompt is cancelled) or no prompt was outstanding.
    pub(crate) fn supply(&mut self, input: Option<String>) -> Option<String> {
        if self.state != ResolutionState::Prompting {
            return None;
        }
        let code = input
            .map(|raw| raw.trim().to_string())
            .filter(|code| !code.is_empty());
        match code {
            Some(code) => {
                self.state = ResolutionState::Submitting;
                Some(code)
            }
            None => {
                self.cancel();
                None
            }
        }
    }

    /// Abandons an outstanding prompt without submitting anything.
    pub(crate) fn cancel(&mut self) {
        if self.state == ResolutionState::Prompting {
            self.state = ResolutionState::Idle;
        }
    }

    /// Completes a submission, whatever its outcome. Returns false if no
    /// submission was in flight.
    pub(crate) fn resolve(&mut self) -> bool {
        if self.state != ResolutionState::Submitting {
            return false;
        }
        self.state = ResolutionState::Idle;
        true
    }
}
