// src/config/tracker.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TRACKER_CONFIG_PATH: &str = "config/tracker.toml";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const ENV_TRACKER_CONFIG_PATH: &str = "TRACKER_CONFIG_PATH";
pub const ENV_API_BASE_URL: &str = "TRACKER_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "TRACKER_HTTP_TIMEOUT_SECS";

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

/// Runtime settings for the tracker service.
///
/// ```toml
/// api_base_url = "http://localhost:5000"
/// http_timeout_secs = 10
/// fixture_path = "config/feeds.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// Root of the retrieval service. Without it the offline fixture is used.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// JSON feed fixture served when no base URL is configured.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            fixture_path: None,
        }
    }
}

impl TrackerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: TrackerConfig = toml::from_str(s).context("parsing tracker config")?;
        cfg.sanitize();
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading tracker config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config file ($TRACKER_CONFIG_PATH, else config/tracker.toml),
    /// then apply env overrides. A missing default file yields defaults; a
    /// missing explicit path is an error.
    pub fn load_default() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_TRACKER_CONFIG_PATH) {
            Ok(p) => Self::load_from_file(PathBuf::from(p))?,
            Err(_) => {
                let p = PathBuf::from(DEFAULT_TRACKER_CONFIG_PATH);
                if p.exists() {
                    Self::load_from_file(&p)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            self.api_base_url = Some(url);
        }
        if let Some(secs) = parse_timeout_env(std::env::var(ENV_HTTP_TIMEOUT_SECS).ok()) {
            self.http_timeout_secs = secs;
        }
        self.sanitize();
    }

    fn sanitize(&mut self) {
        self.api_base_url = self
            .api_base_url
            .take()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        if self.http_timeout_secs == 0 {
            self.http_timeout_secs = DEFAULT_HTTP_TIMEOUT_SECS;
        }
    }
}

fn parse_timeout_env(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
}
