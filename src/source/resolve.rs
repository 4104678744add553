//! Source resolution: local path, cached checkout, or fresh fetch

use super::fetch::Fetcher;
use crate::cache::RepoCache;
use crate::error::{RepocatError, RepocatResult};
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Where files are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A directory on this machine
    Local(PathBuf),
    /// A remote repository identifier (usually a URL)
    Remote(String),
}

/// User-facing source selection: exactly one of the two must be set
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// Local directory
    pub path: Option<PathBuf>,
    /// Remote repository identifier
    pub url: Option<String>,
    /// Ignore and replace any cached checkout
    pub refresh: bool,
}

impl SourceConfig {
    /// Source config for a local directory
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Source config for a remote repository
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Validate and return the configured source.
    ///
    /// # Errors
    /// `NoSource` when neither is set, `ConflictingSources` when both are.
    pub fn source(&self) -> RepocatResult<Source> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty());
        match (url, &self.path) {
            (Some(url), Some(path)) => Err(RepocatError::ConflictingSources {
                url: url.to_string(),
                path: path.clone(),
            }),
            (Some(url), None) => Ok(Source::Remote(url.to_string())),
            (None, Some(path)) => Ok(Source::Local(path.clone())),
            (None, None) => Err(RepocatError::NoSource),
        }
    }
}

/// How a resolved path was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Local directory passed through unchanged
    Local,
    /// Reused cached checkout
    Cached { cached_at: DateTime<Utc> },
    /// Freshly fetched
    Fetched,
}

/// A source resolved to a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub origin: Origin,
}

/// Resolves sources to local directories, consulting the cache before
/// fetching.
pub struct Resolver<F: Fetcher> {
    cache: RepoCache,
    fetcher: F,
    use_cache: bool,
}

impl<F: Fetcher> Resolver<F> {
    /// Create a resolver over `cache` using `fetcher` for misses
    pub fn new(cache: RepoCache, fetcher: F) -> Self {
        Self {
            cache,
            fetcher,
            use_cache: true,
        }
    }

    /// Enable or disable cache lookups and stores
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// The cache backing this resolver
    pub fn cache(&self) -> &RepoCache {
        &self.cache
    }

    /// Resolve `config` to a local directory.
    ///
    /// Local paths are returned unchanged; their existence is checked by
    /// the scan that follows. Remote sources are served from the cache
    /// when possible, otherwise fetched once (no retry) and cached.
    pub async fn resolve(&self, config: &SourceConfig) -> RepocatResult<Resolved> {
        match config.source()? {
            Source::Local(path) => {
                debug!("Using local directory {}", path.display());
                Ok(Resolved {
                    path,
                    origin: Origin::Local,
                })
            }
            Source::Remote(source_id) => self.resolve_remote(&source_id, config.refresh).await,
        }
    }

    async fn resolve_remote(&self, source_id: &str, refresh: bool) -> RepocatResult<Resolved> {
        if self.use_cache {
            if refresh {
                self.cache.invalidate(source_id).await?;
            } else if let Some(entry) = self.cache.lookup(source_id).await? {
                info!("Using cached checkout of {}", source_id);
                return Ok(Resolved {
                    path: entry.repo_path,
                    origin: Origin::Cached {
                        cached_at: entry.cached_at,
                    },
                });
            }
        }

        let dest = self.cache.checkout_dir(source_id);
        self.prepare_dest(&dest).await?;

        debug!("Fetching {} into {} via {}", source_id, dest.display(), self.fetcher.name());
        if let Err(e) = self.fetcher.fetch(source_id, &dest).await {
            if let Err(cleanup) = remove_dir_if_exists(&dest).await {
                warn!("Failed to clean up {}: {}", dest.display(), cleanup);
            }
            return Err(e);
        }

        if self.use_cache {
            if let Err(e) = self.cache.store(source_id, &dest).await {
                warn!("Failed to cache checkout of {}: {}", source_id, e);
            }
        }

        Ok(Resolved {
            path: dest,
            origin: Origin::Fetched,
        })
    }

    /// Make sure the checkout location is free and its parent exists
    async fn prepare_dest(&self, dest: &Path) -> RepocatResult<()> {
        remove_dir_if_exists(dest).await.map_err(|e| {
            RepocatError::io(format!("removing stale checkout {}", dest.display()), e)
        })?;

        fs::create_dir_all(self.cache.root()).await.map_err(|e| {
            RepocatError::io(
                format!("creating cache directory {}", self.cache.root().display()),
                e,
            )
        })
    }
}

async fn remove_dir_if_exists(dir: &Path) -> std::io::Result<()> {
    match fs::remove_dir_all(dir).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Fetcher that writes a single file, or fails on demand
    #[derive(Clone, Default)]
    struct FakeFetcher {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl FakeFetcher {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, source_id: &str, dest: &Path) -> RepocatResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            fs::create_dir_all(dest).await.unwrap();
            if self.fail {
                return Err(RepocatError::fetch(source_id, "remote unreachable"));
            }
            fs::write(dest.join("main.go"), "package main\n").await.unwrap();
            Ok(())
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    const URL: &str = "https://github.com/owner/repo";

    fn resolver(temp: &TempDir, fetcher: FakeFetcher) -> Resolver<FakeFetcher> {
        Resolver::new(RepoCache::new(temp.path().join("cache")), fetcher)
    }

    #[test]
    fn source_requires_exactly_one() {
        assert!(matches!(
            SourceConfig::default().source(),
            Err(RepocatError::NoSource)
        ));

        let both = SourceConfig {
            path: Some(PathBuf::from(".")),
            url: Some(URL.to_string()),
            refresh: false,
        };
        assert!(matches!(
            both.source(),
            Err(RepocatError::ConflictingSources { .. })
        ));

        assert_eq!(
            SourceConfig::local("/tmp/x").source().unwrap(),
            Source::Local(PathBuf::from("/tmp/x"))
        );
        assert_eq!(
            SourceConfig::remote(URL).source().unwrap(),
            Source::Remote(URL.to_string())
        );
    }

    #[test]
    fn blank_url_counts_as_missing() {
        assert!(matches!(
            SourceConfig::remote("  ").source(),
            Err(RepocatError::NoSource)
        ));
    }

    #[tokio::test]
    async fn local_path_passes_through_without_cache() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = resolver(&temp, fetcher.clone());

        let resolved = resolver
            .resolve(&SourceConfig::local("/does/not/matter"))
            .await
            .unwrap();

        assert_eq!(resolved.path, PathBuf::from("/does/not/matter"));
        assert_eq!(resolved.origin, Origin::Local);
        assert_eq!(fetcher.calls(), 0);
        assert!(!resolver.cache().root().exists());
    }

    #[tokio::test]
    async fn no_source_fails_before_io() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = resolver(&temp, fetcher.clone());

        let err = resolver.resolve(&SourceConfig::default()).await.unwrap_err();

        assert!(matches!(err, RepocatError::NoSource));
        assert_eq!(fetcher.calls(), 0);
        assert!(!resolver.cache().root().exists());
    }

    #[tokio::test]
    async fn miss_fetches_and_caches_then_hits() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = resolver(&temp, fetcher.clone());
        let config = SourceConfig::remote(URL);

        let first = resolver.resolve(&config).await.unwrap();
        assert_eq!(first.origin, Origin::Fetched);
        assert_eq!(first.path, resolver.cache().checkout_dir(URL));
        assert!(first.path.join("main.go").exists());

        let second = resolver.resolve(&config).await.unwrap();
        assert!(matches!(second.origin, Origin::Cached { .. }));
        assert_eq!(second.path, first.path);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_without_retry_or_cache() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing();
        let resolver = resolver(&temp, fetcher.clone());

        let err = resolver.resolve(&SourceConfig::remote(URL)).await.unwrap_err();

        match err {
            RepocatError::Fetch { source_id, reason } => {
                assert_eq!(source_id, URL);
                assert_eq!(reason, "remote unreachable");
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
        assert_eq!(fetcher.calls(), 1);
        assert!(!resolver.cache().checkout_dir(URL).exists());
        assert!(resolver.cache().lookup(URL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn refresh_refetches() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = resolver(&temp, fetcher.clone());

        resolver.resolve(&SourceConfig::remote(URL)).await.unwrap();
        let config = SourceConfig {
            refresh: true,
            ..SourceConfig::remote(URL)
        };
        let again = resolver.resolve(&config).await.unwrap();

        assert_eq!(again.origin, Origin::Fetched);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_fetches() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = resolver(&temp, fetcher.clone()).with_cache_enabled(false);
        let config = SourceConfig::remote(URL);

        resolver.resolve(&config).await.unwrap();
        resolver.resolve(&config).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert!(resolver.cache().entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orphaned_metadata_triggers_refetch() {
        let temp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let resolver = resolver(&temp, fetcher.clone());
        let config = SourceConfig::remote(URL);

        let first = resolver.resolve(&config).await.unwrap();
        std::fs::remove_dir_all(&first.path).unwrap();

        let second = resolver.resolve(&config).await.unwrap();
        assert_eq!(second.origin, Origin::Fetched);
        assert!(second.path.join("main.go").exists());
        assert_eq!(fetcher.calls(), 2);
    }
}
