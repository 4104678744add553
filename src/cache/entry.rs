//! Cache metadata record

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata for one cached checkout, stored as `<key>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Source identifier the checkout was fetched from
    pub url: String,

    /// When the checkout was stored
    pub cached_at: DateTime<Utc>,

    /// Local checkout directory
    pub repo_path: PathBuf,

    /// When the entry stops being valid
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stored at `now`, valid for `ttl`.
    ///
    /// Returns `None` when `now + ttl` is not a representable timestamp.
    pub fn new(url: &str, repo_path: PathBuf, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            url: url.to_string(),
            cached_at: now,
            repo_path,
            expires_at,
        })
    }

    /// Check if the entry is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time since the entry was stored
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }

    /// Time left before expiry (zero once expired)
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}
