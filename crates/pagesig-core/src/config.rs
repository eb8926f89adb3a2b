use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::fingerprint::HtmlStrategy;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Global configuration loaded from `~/.config/pagesig/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesigConfig {
    /// Number of fetch workers.
    pub threads: usize,
    /// Capacity of the dispatcher → worker queue (None = 2 × threads).
    #[serde(default)]
    pub queue_depth: Option<usize>,
    /// Total per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect (including TLS handshake) timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Response bodies larger than this abort the transfer.
    pub max_body_bytes: u64,
    /// Pause between dispatching two URLs, in milliseconds.
    #[serde(default)]
    pub dispatch_delay_ms: u64,
    /// How HTML pages are reduced to a signature.
    #[serde(default)]
    pub html_strategy: HtmlStrategy,
    pub user_agent: String,
    pub accept_language: String,
    pub accept: String,
}

impl Default for PagesigConfig {
    fn default() -> Self {
        Self {
            threads: 5,
            queue_depth: None,
            timeout_secs: 3,
            connect_timeout_secs: 3,
            max_body_bytes: 5 * 1024 * 1024,
            dispatch_delay_ms: 0,
            html_strategy: HtmlStrategy::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

impl PagesigConfig {
    /// Rejects values no run can work with.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            anyhow::bail!("threads must be at least 1");
        }
        if self.queue_depth == Some(0) {
            anyhow::bail!("queue_depth must be at least 1");
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            anyhow::bail!("timeouts must be at least 1 second");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("max_body_bytes must be positive");
        }
        Ok(())
    }

    pub fn effective_queue_depth(&self) -> usize {
        self.queue_depth.unwrap_or(self.threads.saturating_mul(2)).max(1)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagesig")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PagesigConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PagesigConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PagesigConfig = toml::from_str(&data)?;
    Ok(cfg)
}
