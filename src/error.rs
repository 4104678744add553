//! Error types for repocat
//!
//! All modules use `RepocatResult<T>` as their return type.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repocat operations
pub type RepocatResult<T> = Result<T, RepocatError>;

/// Where a pattern came from, for error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternRole {
    /// Built-in default exclusion
    Default,
    /// User-supplied exclusion
    Exclude,
    /// User-supplied inclusion
    Include,
}

impl fmt::Display for PatternRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "built-in exclusion",
            Self::Exclude => "exclusion",
            Self::Include => "inclusion",
        };
        write!(f, "{}", name)
    }
}

/// All errors that can occur in repocat
#[derive(Error, Debug)]
pub enum RepocatError {
    // Source configuration errors
    #[error("No source specified: either a repository URL or a local directory path is required")]
    NoSource,

    #[error("Cannot specify both a repository URL ({url}) and a local directory path ({path})")]
    ConflictingSources { url: String, path: PathBuf },

    #[error("Local directory does not exist: {path}")]
    LocalSourceMissing { path: PathBuf },

    // Configuration file errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Filter errors
    #[error("Invalid {role} pattern '{pattern}': {reason}")]
    InvalidPattern {
        role: PatternRole,
        pattern: String,
        reason: String,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Resolution errors
    #[error("Failed to fetch repository {source_id}: {reason}")]
    Fetch { source_id: String, reason: String },

    #[error("Failed to read cache metadata {path}: {reason}")]
    CacheRead { path: PathBuf, reason: String },

    #[error("Checkout {path} is outside cache directory {root}")]
    CacheOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Cache TTL of {ttl_secs} seconds is out of range")]
    CacheTtlOverflow { ttl_secs: i64 },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl RepocatError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a fetch error for a source identifier
    pub fn fetch(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a pattern error
    pub fn invalid_pattern(role: PatternRole, pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            role,
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoSource => Some("Pass --url <repository> or --path <directory>"),
            Self::ConflictingSources { .. } => Some("Use only one of --url and --path"),
            Self::LocalSourceMissing { .. } => Some("Check the --path argument"),
            Self::InvalidPattern { .. } => Some(
                "Patterns starting with '/' match top-level directories, patterns with '*' or '?' are globs, anything else is a regex",
            ),
            Self::Fetch { .. } => Some("Check the repository URL and that git is installed"),
            Self::CacheRead { .. } => Some("Run: repocat cache clear"),
            Self::CacheTtlOverflow { .. } => Some("Lower cache.ttl_secs in the configuration file"),
            _ => None,
        }
    }
}
