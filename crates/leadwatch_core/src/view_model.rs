use crate::{LeadId, ManagerContact, ResolutionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStatus {
    Live,
    #[default]
    Inactive,
}

impl ConsoleStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConsoleStatus::Live => "Live: Syncing...",
            ConsoleStatus::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    #[default]
    Plain,
    Success,
    Warning,
    Important,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    /// Leading `[...]` prefix, brackets included.
    pub timestamp: Option<String>,
    pub text: String,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRowView {
    pub lead_id: LeadId,
    pub label: String,
    pub enriching: bool,
    pub managers: Vec<ManagerContact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub console_status: ConsoleStatus,
    pub console_lines: Vec<ConsoleLine>,
    pub console_cycle: u32,
    pub prompt: ResolutionState,
    pub interrupt_outstanding: bool,
    pub leads: Vec<LeadRowView>,
    pub agent_running: bool,
    pub dirty: bool,
}

/// Splits off a leading `[...]` timestamp and tags the line by its keywords.
///
/// Later rules override earlier ones: a line containing both `DONE` and
/// `ERROR` is a warning.
pub fn classify_line(raw: &str) -> ConsoleLine {
    let mut kind = LineKind::Plain;
    if raw.contains("SUCCESS") || raw.contains("DONE") {
        kind = LineKind::Success;
    }
    if raw.contains("ERROR") || raw.contains("FAILED") {
        kind = LineKind::Warning;
    }
    if raw.contains("SCRAPER START") || raw.contains("Agent started") {
        kind = LineKind::Important;
    }

    let (timestamp, text) = match raw.strip_prefix('[').and_then(|rest| rest.find(']')) {
        Some(close) => {
            let end = close + 2;
            (Some(raw[..end].to_string()), raw[end..].to_string())
        }
        None => (None, raw.to_string()),
    };

    ConsoleLine {
        timestamp,
        text,
        kind,
    }
}
