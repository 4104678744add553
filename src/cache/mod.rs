//! Repository resolution cache
//!
//! Maps a remote source identifier to a local checkout for a fixed
//! time-to-live, so repeated runs against the same repository skip the
//! fetch.
//!
//! # Entry States
//!
//! | State | Metadata | Checkout | Lookup result |
//! |-------|----------|----------|---------------|
//! | Absent | missing | - | miss |
//! | Valid | fresh | present | hit |
//! | Expired | stale | any | miss, both removed |
//! | Orphaned | fresh | missing | miss, metadata removed |
//! | Corrupt | unparsable | any | `CacheRead` error |

pub mod entry;
pub mod repo;

pub use entry::CacheEntry;
pub use repo::{cache_key, RepoCache, DEFAULT_TTL_SECS};
