/// External identifier of a lead record; doubles as the job handle of an enrichment.
pub type LeadId = String;

/// Identifies one armed run of a polling session. Assigned by the state machine.
pub type RunId = u64;

/// The two independently lifecycled polling sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKind {
    /// Console session: drives the visible log view and status label.
    Visible,
    /// Background session: only watches for interrupts while a job runs.
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStopReason {
    /// The session reached its configured cycle cap.
    CycleCap,
    /// The session was stopped explicitly (directly or after a linger).
    Cancelled,
}

/// Current log lines of the watched stream. Each snapshot replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSnapshot {
    pub lines: Vec<String>,
}

impl LogSnapshot {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines joined with newlines, the form interrupt detection runs on.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManagerContact {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_url: Option<String>,
}

/// The slice of a lead record the monitor cares about after a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadSummary {
    pub name: Option<String>,
    pub company: Option<String>,
    pub managers: Vec<ManagerContact>,
}

/// Parameters of a lead-generation agent run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentQuery {
    pub industry: String,
    pub location: Option<String>,
    pub target_persona: Option<String>,
    pub keywords: Vec<String>,
}
