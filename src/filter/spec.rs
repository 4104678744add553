//! Filter specification: built-in exclusions plus user patterns

use super::pattern::Pattern;
use crate::error::{PatternRole, RepocatResult};

/// Exclusions applied to every scan, ahead of user exclusions.
///
/// Covers VCS metadata, OS artifacts, dependency directories, environment
/// files and common binary extensions.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    r"\.git/",
    r"\.gitignore$",
    r"\.DS_Store$",
    r"node_modules/",
    r"\.env$",
    r"\.(jpg|jpeg|png|gif|svg|ico|bmp|tiff|webp)$",
    r"\.(mp4|mov|avi|mkv|webm|flv)$",
    r"\.(mp3|wav|flac|aac|ogg)$",
    r"\.(zip|tar|gz|rar|7z|exe|dmg|pkg)$",
    r"\.(pdf|doc|docx|xls|xlsx|ppt|pptx)$",
];

/// Validated exclusion and inclusion patterns
#[derive(Debug, Clone)]
pub struct FilterSpec {
    defaults: Vec<Pattern>,
    exclusions: Vec<Pattern>,
    inclusions: Vec<Pattern>,
}

impl FilterSpec {
    /// Build a spec from raw user patterns.
    ///
    /// Every pattern is validated here so that a malformed pattern is
    /// reported before any traversal starts.
    ///
    /// # Errors
    /// Returns `RepocatError::InvalidPattern` naming the first bad pattern.
    pub fn new<S: AsRef<str>>(exclusions: &[S], inclusions: &[S]) -> RepocatResult<Self> {
        let defaults = parse_all(DEFAULT_EXCLUSIONS, PatternRole::Default)?;
        let exclusions = parse_all(exclusions, PatternRole::Exclude)?;
        let inclusions = parse_all(inclusions, PatternRole::Include)?;

        Ok(Self {
            defaults,
            exclusions,
            inclusions,
        })
    }

    /// Spec with only the built-in exclusions
    pub fn defaults_only() -> RepocatResult<Self> {
        Self::new::<&str>(&[], &[])
    }

    /// Built-in exclusions followed by user exclusions, in order
    pub fn exclusions(&self) -> impl Iterator<Item = &Pattern> {
        self.defaults.iter().chain(self.exclusions.iter())
    }

    /// User-supplied exclusions only
    pub fn user_exclusions(&self) -> &[Pattern] {
        &self.exclusions
    }

    /// Inclusion patterns (empty means no restriction)
    pub fn inclusions(&self) -> &[Pattern] {
        &self.inclusions
    }

    /// Whether any user pattern was supplied
    pub fn has_user_patterns(&self) -> bool {
        !self.exclusions.is_empty() || !self.inclusions.is_empty()
    }

    /// First exclusion matching the file, if any
    pub fn excluded_by(&self, relative_path: &str, base_name: &str) -> Option<&Pattern> {
        self.exclusions()
            .find(|p| p.matches(relative_path, base_name))
    }

    /// Whether the file passes the inclusion set
    pub fn is_included(&self, relative_path: &str, base_name: &str) -> bool {
        self.inclusions.is_empty()
            || self
                .inclusions
                .iter()
                .any(|p| p.matches(relative_path, base_name))
    }
}

fn parse_all<S: AsRef<str>>(raw: &[S], role: PatternRole) -> RepocatResult<Vec<Pattern>> {
    raw.iter()
        .map(|p| Pattern::parse(p.as_ref(), role))
        .collect()
}
