use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How duplicates are detected before a write.
///
/// `Filename` compares only against the file already occupying the derived
/// filename slot. `Content` additionally keeps a digest → filename index of
/// the whole storage directory so identical images saved under different
/// names are caught too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupPolicy {
    #[default]
    Filename,
    Content,
}

impl std::str::FromStr for DedupPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filename" => Ok(DedupPolicy::Filename),
            "content" => Ok(DedupPolicy::Content),
            other => anyhow::bail!("unknown dedup policy: {} (expected filename or content)", other),
        }
    }
}

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Directory images are saved into, relative to the working directory unless absolute.
    pub storage_dir: PathBuf,
    /// Per-request timeout in seconds (connect and total transfer).
    pub timeout_secs: u64,
    /// Prefix of the timestamped name used when a URL has no usable filename.
    pub fallback_prefix: String,
    /// Extension of the timestamped fallback name (without the dot).
    pub fallback_extension: String,
    /// Number of URLs fetched at once. 1 = strictly sequential, in input order.
    pub jobs: usize,
    /// Duplicate detection policy: "filename" (default) or "content".
    pub dedup: DedupPolicy,
    /// Optional User-Agent header sent with every request.
    pub user_agent: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("Fetched_Images"),
            timeout_secs: 10,
            fallback_prefix: "giltech".to_string(),
            fallback_extension: "jpg".to_string(),
            jobs: 1,
            dedup: DedupPolicy::Filename,
            user_agent: None,
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file. Missing fields take their defaults.
pub fn load_from_path(path: &Path) -> Result<FetcherConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetcherConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetcherConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetcherConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}
