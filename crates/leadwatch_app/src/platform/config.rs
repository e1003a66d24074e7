//! RON configuration file for the leadwatch front end.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use leadwatch_core::Lingers;
use leadwatch_engine::{ApiSettings, PollSettings};
use leadwatch_logging::watch_info;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

pub const DEFAULT_CONFIG_FILENAME: &str = "leadwatch.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub log_stream: String,
    pub connect_timeout_ms: u64,
    pub feed_timeout_ms: u64,
    pub job_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let defaults = ApiSettings::default();
        Self {
            base_url: defaults.base_url,
            log_stream: defaults.log_stream,
            connect_timeout_ms: defaults.connect_timeout.as_millis() as u64,
            feed_timeout_ms: defaults.feed_timeout.as_millis() as u64,
            job_timeout_ms: defaults.job_timeout.as_millis() as u64,
        }
    }
}

/// Visible console session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub interval_ms: u64,
    pub max_cycles: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            max_cycles: 12,
        }
    }
}

/// Silent interrupt-watch session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_ms: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LingerConfig {
    pub enrichment_ms: u64,
    pub agent_ms: u64,
}

impl Default for LingerConfig {
    fn default() -> Self {
        let defaults = Lingers::default();
        Self {
            enrichment_ms: defaults.enrichment.as_millis() as u64,
            agent_ms: defaults.agent.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub console: ConsoleConfig,
    pub watch: WatchConfig,
    pub linger: LingerConfig,
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api.base_url.clone(),
            log_stream: self.api.log_stream.clone(),
            connect_timeout: Duration::from_millis(self.api.connect_timeout_ms),
            feed_timeout: Duration::from_millis(self.api.feed_timeout_ms),
            job_timeout: Duration::from_millis(self.api.job_timeout_ms),
        }
    }

    pub fn console_poll(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.console.interval_ms),
            max_cycles: Some(self.console.max_cycles),
        }
    }

    pub fn watch_poll(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.watch.interval_ms),
            max_cycles: None,
        }
    }

    pub fn lingers(&self) -> Lingers {
        Lingers {
            enrichment: Duration::from_millis(self.linger.enrichment_ms),
            agent: Duration::from_millis(self.linger.agent_ms),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.console.interval_ms == 0 || self.watch.interval_ms == 0 {
            bail!("polling intervals must be greater than zero");
        }
        if self.console.max_cycles == 0 {
            bail!("console.max_cycles must be greater than zero");
        }
        Ok(())
    }
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            watch_info!("No config at {:?}, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    let config: AppConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    watch_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Writes a pretty-printed default config, atomically.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&AppConfig::default(), pretty)
        .context("failed to serialize default config")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
