use std::time::Duration;

use crate::{AgentQuery, LeadId, RunId, SessionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm (or re-arm) a polling session; events must be tagged with `run`.
    StartPolling { session: SessionKind, run: RunId },
    /// Stop the session's current run once `linger` has elapsed.
    StopPolling { session: SessionKind, linger: Duration },
    StartEnrichment { lead_id: LeadId },
    StartAgentRun(AgentQuery),
    RefreshLead { lead_id: LeadId },
    /// Ask the human for a verification code and report back with `Msg::CodeEntered`.
    PromptForCode,
    SubmitCode { code: String },
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Error,
            message: message.into(),
        }
    }
}
