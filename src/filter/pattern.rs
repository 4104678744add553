//! Pattern classification and matching
//!
//! A raw pattern string is classified exactly once, when it is parsed:
//!
//! | Raw form | Kind | Matches against |
//! |----------|------|-----------------|
//! | `/name` | path prefix | first segment of the relative path |
//! | contains `*` or `?` | glob | relative path or base name |
//! | anything else | regex | relative path or base name |

use crate::error::{PatternRole, RepocatError, RepocatResult};
use regex::Regex;
use std::fmt;

/// Kind of a parsed pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Regex,
    Glob,
    PathPrefix,
}

impl PatternKind {
    /// Classify a raw pattern string
    pub fn classify(raw: &str) -> Self {
        if raw.starts_with('/') {
            Self::PathPrefix
        } else if raw.contains('*') || raw.contains('?') {
            Self::Glob
        } else {
            Self::Regex
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Regex => "regex",
            Self::Glob => "glob",
            Self::PathPrefix => "path",
        };
        write!(f, "{}", name)
    }
}

/// A validated file pattern
#[derive(Debug, Clone)]
pub enum Pattern {
    /// `/name`: the first path segment must start with `prefix`
    PathPrefix { original: String, prefix: String },
    /// Shell-style glob compiled to an anchored regex
    Glob { original: String, compiled: Regex },
    /// Regular expression used as-is
    Regex { original: String, compiled: Regex },
}

impl Pattern {
    /// Parse and validate a raw pattern string.
    ///
    /// # Errors
    /// Returns `RepocatError::InvalidPattern` for empty patterns and for
    /// regex/glob patterns that fail to compile.
    pub fn parse(raw: &str, role: PatternRole) -> RepocatResult<Self> {
        if raw.is_empty() {
            return Err(RepocatError::invalid_pattern(role, raw, "pattern is empty"));
        }

        match PatternKind::classify(raw) {
            PatternKind::PathPrefix => Ok(Self::PathPrefix {
                original: raw.to_string(),
                prefix: raw.trim_start_matches('/').to_string(),
            }),
            PatternKind::Glob => {
                let translated = glob_to_regex(raw);
                Regex::new(&translated)
                    .map(|compiled| Self::Glob {
                        original: raw.to_string(),
                        compiled,
                    })
                    .map_err(|e| RepocatError::invalid_pattern(role, raw, e.to_string()))
            }
            PatternKind::Regex => Regex::new(raw)
                .map(|compiled| Self::Regex {
                    original: raw.to_string(),
                    compiled,
                })
                .map_err(|e| RepocatError::invalid_pattern(role, raw, e.to_string())),
        }
    }

    /// Kind of this pattern
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::PathPrefix { .. } => PatternKind::PathPrefix,
            Self::Glob { .. } => PatternKind::Glob,
            Self::Regex { .. } => PatternKind::Regex,
        }
    }

    /// The pattern as the user wrote it
    pub fn original(&self) -> &str {
        match self {
            Self::PathPrefix { original, .. }
            | Self::Glob { original, .. }
            | Self::Regex { original, .. } => original,
        }
    }

    /// Test a file against this pattern.
    ///
    /// `relative_path` must use `/` as separator. Regex and glob patterns
    /// match if either the relative path or the base name matches.
    pub fn matches(&self, relative_path: &str, base_name: &str) -> bool {
        match self {
            Self::PathPrefix { prefix, .. } => relative_path
                .split('/')
                .next()
                .is_some_and(|first| first.starts_with(prefix.as_str())),
            Self::Glob { compiled, .. } | Self::Regex { compiled, .. } => {
                compiled.is_match(relative_path) || compiled.is_match(base_name)
            }
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.original() == other.original()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.original(), self.kind())
    }
}

/// Translate a glob into an anchored regex.
///
/// Every regex metacharacter except `*` and `?` is escaped; `*` becomes `.*`
/// and `?` becomes `.`. The result is anchored at each end unless it already
/// begins or ends with `.*`.
pub fn glob_to_regex(glob: &str) -> String {
    let escaped = regex::escape(glob)
        .replace("\\*", ".*")
        .replace("\\?", ".");

    let mut translated = String::with_capacity(escaped.len() + 2);
    if !escaped.starts_with(".*") {
        translated.push('^');
    }
    translated.push_str(&escaped);
    if !escaped.ends_with(".*") {
        translated.push('$');
    }
    translated
}
