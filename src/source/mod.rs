//! Source resolution
//!
//! Turns a user's source selection (a local directory or a remote
//! repository) into a local directory to scan. Remote repositories are
//! fetched through a [`Fetcher`] and kept in the [`RepoCache`](crate::cache::RepoCache).

pub mod fetch;
pub mod resolve;

pub use fetch::{Fetcher, GitFetcher};
pub use resolve::{Origin, Resolved, Resolver, Source, SourceConfig};
