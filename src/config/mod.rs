//! Configuration management for repocat

pub mod schema;

pub use schema::Config;

use crate::cache::RepoCache;
use crate::error::{RepocatError, RepocatResult};
use crate::source::GitFetcher;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("repocat")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file is absent
    pub async fn load(&self) -> RepocatResult<Config> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> RepocatResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RepocatError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| RepocatError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> RepocatResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            RepocatError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> RepocatResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RepocatError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Checkout cache described by `[cache]`
    pub fn repo_cache(&self) -> RepoCache {
        let ttl = i64::try_from(self.cache.ttl_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        RepoCache::new(&self.cache.dir).with_ttl(chrono::Duration::seconds(ttl))
    }

    /// Git fetcher described by `[fetch]`
    pub fn git_fetcher(&self) -> GitFetcher {
        GitFetcher::new()
            .with_program(&self.fetch.git)
            .with_shallow(self.fetch.shallow)
    }

    /// Configured patterns followed by command-line ones
    pub fn merged_patterns(&self, exclude: &[String], include: &[String]) -> (Vec<String>, Vec<String>) {
        let exclusions = self.filter.exclude.iter().chain(exclude).cloned().collect();
        let inclusions = self.filter.include.iter().chain(include).cloned().collect();
        (exclusions, inclusions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.fetch.git, "git");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.cache.ttl_secs = 60;
        config.filter.include = vec!["*.rs".to_string()];

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.cache.ttl_secs, 60);
        assert_eq!(loaded.filter.include, vec!["*.rs"]);
    }

    #[tokio::test]
    async fn invalid_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[cache\nenabled = ").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        match err {
            RepocatError::ConfigInvalid { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn config_patterns_come_first() {
        let mut config = Config::default();
        config.filter.exclude = vec!["vendor".to_string()];

        let (ex, inc) = config.merged_patterns(&["*.lock".to_string()], &[]);
        assert_eq!(ex, vec!["vendor", "*.lock"]);
        assert!(inc.is_empty());
    }

    #[test]
    fn repo_cache_uses_configured_ttl_and_dir() {
        let mut config = Config::default();
        config.cache.ttl_secs = 90;
        config.cache.dir = PathBuf::from("/tmp/rc-test");

        let cache = config.repo_cache();
        assert_eq!(cache.ttl(), chrono::Duration::seconds(90));
        assert_eq!(cache.root(), Path::new("/tmp/rc-test"));
    }

    #[tokio::test]
    async fn huge_ttl_fails_store_instead_of_panicking() {
        let temp = TempDir::new().unwrap();
        for ttl_secs in [10_000_000_000_000, u64::MAX] {
            let mut config = Config::default();
            config.cache.ttl_secs = ttl_secs;
            config.cache.dir = temp.path().join("cache");

            let cache = config.repo_cache();
            let checkout = cache.checkout_dir("u");
            std::fs::create_dir_all(&checkout).unwrap();

            let err = cache.store("u", &checkout).await.unwrap_err();
            assert!(matches!(err, RepocatError::CacheTtlOverflow { .. }));
            assert!(err.hint().is_some());
        }
    }
}
