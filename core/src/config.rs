use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024; // 1 MiB

/// Settings for a multi-file scan, stored as TOML:
///
/// ```toml
/// exclude = [".git", "node_modules"]
/// glob = ["*.rs", "*.go"]
/// max_file_size = 524288
/// threads = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Path components that prune a directory walk.
    pub exclude: Vec<String>,
    /// Walked files must match one of these patterns; empty means all files.
    pub glob: Vec<String>,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Worker threads; `None` uses one per core.
    pub threads: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: [".git", "node_modules", "target", "vendor", "dist", "__pycache__"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            glob: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            threads: None,
        }
    }
}

impl ScanConfig {
    /// Load from `path` if given, else from the user config file if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded scan config");
        Ok(config)
    }
}

/// `<config dir>/glean/config.toml`, e.g. `~/.config/glean/config.toml` on Linux.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("glean").join("config.toml"))
}
