//! repocat - concatenate a repository into one document
//!
//! Resolves a local directory or a remote repository (through a TTL cache
//! of checkouts), selects its text files with exclusion and inclusion
//! patterns, and renders them into a single fenced document.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod source;
pub mod ui;

pub use error::{RepocatError, RepocatResult};
