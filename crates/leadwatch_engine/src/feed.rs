use leadwatch_logging::{watch_debug, watch_warn};
use serde_json::Value;

use crate::client::{check_status, map_reqwest_error};
use crate::{ApiClient, ApiError, LogSnapshot};

/// Source of log snapshots for a polling session.
#[async_trait::async_trait]
pub trait LogFeed: Send + Sync {
    /// Returns the current snapshot, or `None` when this cycle produced no data.
    ///
    /// Implementations must not fail: transient errors are logged and
    /// reported as `None` so the polling loop keeps running.
    async fn fetch_snapshot(&self) -> Option<LogSnapshot>;
}

/// Reads the configured stream from `GET /debug/status`.
#[derive(Debug, Clone)]
pub struct ReqwestLogFeed {
    api: ApiClient,
}

impl ReqwestLogFeed {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One status request with its raw outcome.
    pub async fn try_fetch(&self) -> Result<LogSnapshot, ApiError> {
        let url = self.api.endpoint(&["debug", "status"])?;
        let response = self
            .api
            .http()
            .get(url)
            .timeout(self.api.settings().feed_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body: Value = response.json().await.map_err(map_reqwest_error)?;

        let stream = self.api.settings().log_stream.clone();
        let lines = stream_lines(&body, &stream);
        Ok(LogSnapshot { stream, lines })
    }
}

#[async_trait::async_trait]
impl LogFeed for ReqwestLogFeed {
    async fn fetch_snapshot(&self) -> Option<LogSnapshot> {
        match self.try_fetch().await {
            Ok(snapshot) => {
                watch_debug!(
                    "status feed returned {} lines for {}",
                    snapshot.lines.len(),
                    snapshot.stream
                );
                Some(snapshot)
            }
            Err(err) => {
                watch_warn!("Failed to fetch logs: {}", err);
                None
            }
        }
    }
}

/// `logs` is either a map of stream name to lines or a bare list of lines.
/// Anything else, including a missing stream, reads as no lines.
fn stream_lines(body: &Value, stream: &str) -> Vec<String> {
    let lines = match body.get("logs") {
        Some(Value::Object(streams)) => streams.get(stream).and_then(Value::as_array),
        Some(Value::Array(lines)) => Some(lines),
        _ => None,
    };
    lines
        .map(|lines| {
            lines
                .iter()
                .map(|line| match line {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}
