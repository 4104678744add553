//! Directory scan applying a `FilterSpec`

use super::spec::FilterSpec;
use super::text::is_text_file;
use crate::error::{RepocatError, RepocatResult};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Shape of a scan result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Keep both included and excluded records
    DryRun,
    /// Keep only included records
    Collect,
}

/// Why a file ended up excluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Null byte in the sampled content, or unreadable
    Binary,
    /// Matched an exclusion pattern
    Pattern(String),
    /// Matched no inclusion pattern
    NotIncluded,
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Pattern(p) => write!(f, "pattern {}", p),
            Self::NotIncluded => write!(f, "not included"),
        }
    }
}

/// A file encountered during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
    /// Absolute path on disk
    pub absolute_path: PathBuf,
    /// Size in bytes (0 when metadata is unavailable)
    pub size: u64,
    /// Last modification time, when available
    pub modified: Option<DateTime<Utc>>,
    /// Whether the entry is a directory (never set for emitted records)
    pub is_dir: bool,
    /// Exclusion reason, `None` for included files
    pub excluded: Option<Exclusion>,
}

/// Result of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Scan root, absolute
    pub root: PathBuf,
    /// Selected files, in walk order
    pub included: Vec<FileRecord>,
    /// Rejected files, in walk order (always empty in collect mode)
    pub excluded: Vec<FileRecord>,
}

impl ScanResult {
    /// Relative paths of the included files
    pub fn included_relative(&self) -> Vec<&str> {
        self.included
            .iter()
            .map(|r| r.relative_path.as_str())
            .collect()
    }

    /// Relative paths of the excluded files
    pub fn excluded_relative(&self) -> Vec<&str> {
        self.excluded
            .iter()
            .map(|r| r.relative_path.as_str())
            .collect()
    }

    /// Total size of the included files in bytes
    pub fn included_size(&self) -> u64 {
        self.included.iter().map(|r| r.size).sum()
    }
}

/// Walk `root` and classify every file against `spec`.
///
/// Directories are traversed but never emitted; symbolic links are not
/// followed. The first walk error aborts the scan.
///
/// # Errors
/// Returns `RepocatError::Walk` when the root or any entry below it cannot
/// be read.
pub fn scan(root: &Path, spec: &FilterSpec, mode: ScanMode) -> RepocatResult<ScanResult> {
    let root = std::path::absolute(root).map_err(|e| RepocatError::Walk {
        path: root.to_path_buf(),
        source: e,
    })?;

    debug!("Scanning {} ({:?})", root.display(), mode);

    let mut result = ScanResult {
        root: root.clone(),
        ..Default::default()
    };

    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            RepocatError::Walk {
                path,
                source: e.into(),
            }
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let record = classify(&root, entry.path(), spec);
        trace!("{} -> {:?}", record.relative_path, record.excluded);

        match record.excluded {
            None => result.included.push(record),
            Some(_) if mode == ScanMode::DryRun => result.excluded.push(record),
            Some(_) => {}
        }
    }

    debug!(
        "Scan of {} finished: {} included, {} excluded",
        root.display(),
        result.included.len(),
        result.excluded.len()
    );

    Ok(result)
}

/// Classify a single file. Binary detection runs before any pattern.
fn classify(root: &Path, path: &Path, spec: &FilterSpec) -> FileRecord {
    let relative_path = relative_slash_path(root, path);
    let base_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let excluded = if !is_text_file(path) {
        Some(Exclusion::Binary)
    } else if let Some(pattern) = spec.excluded_by(&relative_path, &base_name) {
        Some(Exclusion::Pattern(pattern.original().to_string()))
    } else if !spec.is_included(&relative_path, &base_name) {
        Some(Exclusion::NotIncluded)
    } else {
        None
    };

    let (size, modified) = match path.metadata() {
        Ok(meta) => (
            meta.len(),
            meta.modified().ok().map(DateTime::<Utc>::from),
        ),
        Err(e) => {
            debug!("No metadata for {}: {}", path.display(), e);
            (0, None)
        }
    };

    FileRecord {
        relative_path,
        absolute_path: path.to_path_buf(),
        size,
        modified,
        is_dir: false,
        excluded,
    }
}

/// Path relative to `root` with `/` separators
fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
