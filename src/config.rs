use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct QuotebotConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub refresh: RefreshConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    /// Source identifier: `github` or `file`.
    pub kind: String,
    pub url: String,
    pub token: Option<String>,
    pub api_version: String,
    pub path: String,
    pub timeout_secs: u64,
    pub skip_blank_lines: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between background reloads. `0` disables them.
    pub interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8717,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: "github".into(),
            url: String::new(),
            token: None,
            api_version: "2022-11-28".into(),
            path: String::new(),
            timeout_secs: 30,
            skip_blank_lines: true,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
        }
    }
}

/// Returns `~/.quotebot/`
pub fn default_quotebot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".quotebot")
}

/// Returns the default config file path: `~/.quotebot/config.toml`
pub fn default_config_path() -> PathBuf {
    default_quotebot_dir().join("config.toml")
}

impl QuotebotConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            QuotebotConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// `GITHUB_QUOTE_FILE` and `GITHUB_ACCESS_TOKEN` keep the names older
    /// deployments already export.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `var`, keyed by environment variable name.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GITHUB_QUOTE_FILE") {
            self.source.url = val;
        }
        if let Some(val) = var("GITHUB_ACCESS_TOKEN") {
            self.source.token = Some(val);
        }
        if let Some(val) = var("QUOTEBOT_SOURCE") {
            self.source.kind = val;
        }
        if let Some(val) = var("QUOTEBOT_QUOTE_PATH") {
            self.source.path = val;
        }
        if let Some(val) = var("QUOTEBOT_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }
}

impl RefreshConfig {
    /// Refresh period, or `None` when background refresh is disabled.
    pub fn interval(&self) -> Option<std::time::Duration> {
        (self.interval_secs > 0).then(|| std::time::Duration::from_secs(self.interval_secs))
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
