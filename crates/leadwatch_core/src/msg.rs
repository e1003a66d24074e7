use crate::{AgentQuery, LeadId, LeadSummary, LogSnapshot, ManagerContact, PollStopReason, RunId, SessionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to enrich a lead with manager contacts.
    EnrichRequested(LeadId),
    /// The enrichment request for a lead returned.
    EnrichmentFinished {
        lead_id: LeadId,
        result: Result<Vec<ManagerContact>, String>,
    },
    /// The record collaborator returned fresh data for a lead.
    LeadRefreshed {
        lead_id: LeadId,
        result: Result<LeadSummary, String>,
    },
    /// User asked to start a lead-generation agent run.
    AgentRunRequested(AgentQuery),
    /// The agent start request returned.
    AgentRunFinished { result: Result<String, String> },
    /// User opened the progress console without starting a job.
    ConsoleRequested,
    /// A polling session completed one cycle. `None` means the cycle was skipped.
    LogsPolled {
        session: SessionKind,
        run: RunId,
        cycle: u32,
        snapshot: Option<LogSnapshot>,
    },
    /// A polling session run ended.
    PollingStopped {
        session: SessionKind,
        run: RunId,
        reason: PollStopReason,
    },
    /// The human answered the verification prompt. `None` means declined.
    CodeEntered(Option<String>),
    /// The resume endpoint answered a code submission.
    CodeSubmitted { result: Result<(), String> },
}
