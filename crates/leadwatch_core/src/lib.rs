//! Leadwatch core: pure state machine for job monitoring and interrupt handling.
mod effect;
mod interrupt;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::{Effect, Notification, NotifyLevel};
pub use interrupt::{detect, InterruptResolution, ResolutionState, ACTION_REQUIRED_SENTINEL};
pub use msg::Msg;
pub use state::{AppState, Lingers};
pub use types::{
    AgentQuery, LeadId, LeadSummary, LogSnapshot, ManagerContact, PollStopReason, RunId,
    SessionKind,
};
pub use update::update;
pub use view_model::{classify_line, AppViewModel, ConsoleLine, ConsoleStatus, LeadRowView, LineKind};
