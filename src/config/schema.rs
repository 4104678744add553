//! Configuration schema for repocat
//!
//! Configuration is stored at `~/.config/repocat/config.toml`

use crate::output::DEFAULT_TREE_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the cache directory under the system temp directory
pub const CACHE_DIR_NAME: &str = "repo-concat-cache";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Checkout cache settings
    pub cache: CacheConfig,

    /// Patterns applied to every scan
    pub filter: FilterConfig,

    /// Remote fetch settings
    pub fetch: FetchConfig,

    /// Document output settings
    pub output: OutputConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse fetched checkouts (default: true)
    pub enabled: bool,

    /// Seconds a checkout stays valid
    pub ttl_secs: u64,

    /// Cache root directory
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
            dir: std::env::temp_dir().join(CACHE_DIR_NAME),
        }
    }
}

/// Filter patterns prepended to the command-line ones
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub exclude: Vec<String>,
    pub include: Vec<String>,
}

/// Fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Git executable
    pub git: String,

    /// Clone only the latest commit
    pub shallow: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            shallow: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `repo-concat-output/`
    pub dir: PathBuf,

    /// Print a token estimate after writing
    pub estimate_tokens: bool,

    /// Levels shown in the tree preview
    pub tree_depth: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            estimate_tokens: true,
            tree_depth: DEFAULT_TREE_DEPTH,
        }
    }
}
