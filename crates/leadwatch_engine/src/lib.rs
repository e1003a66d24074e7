//! Leadwatch engine: HTTP clients for the job host and the polling session.
mod client;
mod feed;
mod jobs;
mod poll;
mod types;

pub use client::{ApiClient, ApiSettings};
pub use feed::{LogFeed, ReqwestLogFeed};
pub use jobs::{JobApi, ReqwestJobApi};
pub use poll::{PollEvent, PollSettings, PollingSession, StopReason};
pub use types::{
    AgentRunAck, AgentRunRequest, ApiError, EnrichmentOutcome, LeadRecord, LogSnapshot,
    ManagerRecord,
};
