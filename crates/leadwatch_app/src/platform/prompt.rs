//! Collection of the verification code from the human.

use std::io::Write;

use leadwatch_logging::watch_warn;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Asks the human for one verification code.
///
/// Resolves to `None` when the human declines. Callers must not block the
/// event loop while this is pending.
#[async_trait::async_trait]
pub trait CodePrompter: Send + Sync {
    async fn collect_code(&self) -> Option<String>;
}

/// Reads a single line from stdin. A blank line or end of input declines.
#[derive(Debug, Default)]
pub struct StdinPrompter;

#[async_trait::async_trait]
impl CodePrompter for StdinPrompter {
    async fn collect_code(&self) -> Option<String> {
        {
            let mut stdout = std::io::stdout().lock();
            let _ = write!(stdout, "🔐 Enter verification code (blank to cancel): ");
            let _ = stdout.flush();
        }

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        match reader.read_line(&mut line).await {
            Ok(0) => None,
            Ok(_) => {
                let code = line.trim();
                (!code.is_empty()).then(|| code.to_string())
            }
            Err(err) => {
                watch_warn!("Failed to read verification code: {}", err);
                None
            }
        }
    }
}
