use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Log lines of one stream as reported by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSnapshot {
    pub stream: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManagerRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
}

/// Success payload of the enrichment endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct EnrichmentOutcome {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub managers: Vec<ManagerRecord>,
}

/// The fields of a lead record consumed after an enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub managers_info: Vec<ManagerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AgentRunRequest {
    pub industry: String,
    pub location: Option<String>,
    pub target_persona: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AgentRunAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    /// Non-success status. `detail` is the server's message when it sent one.
    #[error("{detail}")]
    HttpStatus { status: u16, detail: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
