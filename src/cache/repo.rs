//! TTL cache of fetched repository checkouts

use super::entry::CacheEntry;
use crate::error::{RepocatError, RepocatResult};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Default time-to-live for a cached checkout, in seconds
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Cache key for a source identifier: first 16 bytes of its SHA-256, hex
pub fn cache_key(source_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_id.as_bytes());
    let result = hasher.finalize();

    hex::encode(&result[..16])
}

/// Repository checkout cache rooted at an explicit directory.
///
/// Layout: `<root>/<key>.json` holds the metadata, `<root>/<key>/` the
/// checkout. Expired or orphaned entries are removed lazily on lookup; there
/// is no background sweep. The cache takes no locks, so concurrent callers
/// must serialize access per source.
#[derive(Debug, Clone)]
pub struct RepoCache {
    root: PathBuf,
    ttl: Duration,
}

impl RepoCache {
    /// Create a cache rooted at `root` with the default TTL
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    /// Set the time-to-live for new entries
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Time-to-live for new entries
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Deterministic checkout directory for a source
    pub fn checkout_dir(&self, source_id: &str) -> PathBuf {
        self.root.join(cache_key(source_id))
    }

    /// Look up a valid entry for `source_id`
    pub async fn lookup(&self, source_id: &str) -> RepocatResult<Option<CacheEntry>> {
        self.lookup_at(source_id, Utc::now()).await
    }

    /// Look up a valid entry as of `now`.
    ///
    /// Missing metadata is a miss. Metadata that exists but cannot be read
    /// or parsed is an error. An expired entry has its checkout and metadata
    /// deleted; an entry whose checkout vanished has its metadata deleted.
    pub async fn lookup_at(
        &self,
        source_id: &str,
        now: DateTime<Utc>,
    ) -> RepocatResult<Option<CacheEntry>> {
        let metadata_path = self.metadata_path(&cache_key(source_id));

        let Some(entry) = read_entry(&metadata_path).await? else {
            debug!("Cache miss for {}", source_id);
            return Ok(None);
        };

        if entry.is_expired_at(now) {
            debug!("Cache entry for {} expired at {}", source_id, entry.expires_at);
            self.remove_checkout(&entry.repo_path).await?;
            remove_file_if_exists(&metadata_path).await?;
            return Ok(None);
        }

        if !fs::try_exists(&entry.repo_path).await.unwrap_or(false) {
            warn!(
                "Cached checkout {} for {} is missing, dropping entry",
                entry.repo_path.display(),
                source_id
            );
            remove_file_if_exists(&metadata_path).await?;
            return Ok(None);
        }

        debug!("Cache hit for {}: {}", source_id, entry.repo_path.display());
        Ok(Some(entry))
    }

    /// Record `local_path` as the checkout for `source_id`
    pub async fn store(&self, source_id: &str, local_path: &Path) -> RepocatResult<CacheEntry> {
        self.store_at(source_id, local_path, Utc::now()).await
    }

    /// Record a checkout as stored at `now`, overwriting any prior entry.
    ///
    /// The checkout must live under the cache root so that eviction can
    /// always delete it.
    pub async fn store_at(
        &self,
        source_id: &str,
        local_path: &Path,
        now: DateTime<Utc>,
    ) -> RepocatResult<CacheEntry> {
        if !self.owns(local_path) {
            return Err(RepocatError::CacheOutsideRoot {
                path: local_path.to_path_buf(),
                root: self.root.clone(),
            });
        }

        let entry = CacheEntry::new(source_id, local_path.to_path_buf(), now, self.ttl)
            .ok_or_else(|| RepocatError::CacheTtlOverflow {
                ttl_secs: self.ttl.num_seconds(),
            })?;

        fs::create_dir_all(&self.root).await.map_err(|e| {
            RepocatError::io(format!("creating cache directory {}", self.root.display()), e)
        })?;

        let metadata_path = self.metadata_path(&cache_key(source_id));
        let content = serde_json::to_string_pretty(&entry)?;

        fs::write(&metadata_path, content).await.map_err(|e| {
            RepocatError::io(format!("writing cache file {}", metadata_path.display()), e)
        })?;

        debug!("Cached {} until {}", source_id, entry.expires_at);
        Ok(entry)
    }

    /// Drop the entry for `source_id` and its checkout
    pub async fn invalidate(&self, source_id: &str) -> RepocatResult<bool> {
        let metadata_path = self.metadata_path(&cache_key(source_id));
        let entry = read_entry(&metadata_path).await.ok().flatten();

        if let Some(ref entry) = entry {
            self.remove_checkout(&entry.repo_path).await?;
        }
        let removed = remove_file_if_exists(&metadata_path).await?;

        if removed {
            debug!("Invalidated cache entry for {}", source_id);
        }
        Ok(removed || entry.is_some())
    }

    /// All entries with readable metadata, newest first
    pub async fn entries(&self) -> RepocatResult<Vec<CacheEntry>> {
        let mut entries = Vec::new();
        for path in self.metadata_files().await? {
            match read_entry(&path).await {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable cache entry: {}", e),
            }
        }

        entries.sort_by(|a, b| b.cached_at.cmp(&a.cached_at));
        Ok(entries)
    }

    /// Remove expired, orphaned and unreadable entries
    pub async fn prune(&self) -> RepocatResult<usize> {
        self.prune_at(Utc::now()).await
    }

    /// Remove entries that are invalid as of `now`, returning how many
    pub async fn prune_at(&self, now: DateTime<Utc>) -> RepocatResult<usize> {
        let mut pruned = 0;

        for path in self.metadata_files().await? {
            let entry = match read_entry(&path).await {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Removing unreadable cache entry: {}", e);
                    if let Some(checkout) = self.checkout_for_metadata(&path) {
                        self.remove_checkout(&checkout).await?;
                    }
                    remove_file_if_exists(&path).await?;
                    pruned += 1;
                    continue;
                }
            };

            if entry.is_expired_at(now) {
                self.remove_checkout(&entry.repo_path).await?;
                remove_file_if_exists(&path).await?;
                pruned += 1;
            } else if !fs::try_exists(&entry.repo_path).await.unwrap_or(false) {
                remove_file_if_exists(&path).await?;
                pruned += 1;
            }
        }

        debug!("Pruned {} cache entries", pruned);
        Ok(pruned)
    }

    /// Remove every entry and its checkout, returning how many entries
    pub async fn clear(&self) -> RepocatResult<usize> {
        let mut cleared = 0;

        for path in self.metadata_files().await? {
            if let Ok(Some(entry)) = read_entry(&path).await {
                self.remove_checkout(&entry.repo_path).await?;
            }
            if let Some(checkout) = self.checkout_for_metadata(&path) {
                self.remove_checkout(&checkout).await?;
            }
            if remove_file_if_exists(&path).await? {
                cleared += 1;
            }
        }

        debug!("Cleared {} cache entries", cleared);
        Ok(cleared)
    }

    fn metadata_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// `<root>/<key>/` for a `<root>/<key>.json` metadata file
    fn checkout_for_metadata(&self, metadata_path: &Path) -> Option<PathBuf> {
        metadata_path.file_stem().map(|stem| self.root.join(stem))
    }

    /// Whether `path` is a directory strictly below the cache root
    fn owns(&self, path: &Path) -> bool {
        path.starts_with(&self.root) && path != self.root
    }

    async fn metadata_files(&self) -> RepocatResult<Vec<PathBuf>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(RepocatError::io("reading cache directory", e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| RepocatError::io("reading cache entry", e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Delete a checkout directory. Metadata edited to point outside the
    /// root is never followed.
    async fn remove_checkout(&self, repo_path: &Path) -> RepocatResult<()> {
        if !self.owns(repo_path) {
            warn!(
                "Not removing {}: outside cache root {}",
                repo_path.display(),
                self.root.display()
            );
            return Ok(());
        }

        match fs::remove_dir_all(repo_path).await {
            Ok(()) => {
                debug!("Removed cached checkout {}", repo_path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepocatError::io(
                format!("removing cached checkout {}", repo_path.display()),
                e,
            )),
        }
    }
}

/// Read and parse a metadata file; `None` when it does not exist
async fn read_entry(path: &Path) -> RepocatResult<Option<CacheEntry>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(RepocatError::CacheRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| RepocatError::CacheRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

async fn remove_file_if_exists(path: &Path) -> RepocatResult<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RepocatError::io(
            format!("removing cache file {}", path.display()),
            e,
        )),
    }
}
