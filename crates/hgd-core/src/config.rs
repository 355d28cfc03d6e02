use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Bounded-retry policy parameters (optional section in config.toml).
///
/// When the section is absent, downloads are retried immediately and forever,
/// which is the stock behavior: the loop never skips an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per image (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/hgd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HgdConfig {
    /// Number of image frontends; modulus when mapping a gallery digit to a
    /// subdomain letter.
    pub frontend_count: u32,
    /// When true, the subdomain letter is forced to "0" instead of being
    /// derived from the gallery digit. Off in the stock configuration.
    pub adaptive_mode: bool,
    /// Enable curl's in-memory cookie engine for all requests.
    #[serde(default)]
    pub enable_cookies: bool,
    /// Optional bounded-retry policy; if missing, downloads retry forever.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for HgdConfig {
    fn default() -> Self {
        Self {
            frontend_count: 2,
            adaptive_mode: false,
            enable_cookies: false,
            retry: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hgd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HgdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HgdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HgdConfig = toml::from_str(&data)?;
    Ok(cfg)
}
