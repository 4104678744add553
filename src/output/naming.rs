//! Document naming

use crate::source::Source;
use chrono::{DateTime, Local};
use std::path::Path;

const FALLBACK_NAME: &str = "repository";

/// Repository name from a remote identifier.
///
/// For `scheme://host/owner/name(.git)` this is `name`. Identifiers that are
/// not URLs (such as `git@host:owner/name.git`) use their last `/` segment.
pub fn repo_name(source_id: &str) -> String {
    let path = match source_id.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or(""),
        None => {
            let first = source_id.split('/').next().unwrap_or("");
            if first.contains(':') {
                return non_empty(last_segment(source_id));
            }
            source_id
        }
    };
    let path = path.split(['?', '#']).next().unwrap_or("");

    match path.trim_matches('/').split('/').nth(1) {
        Some(name) => non_empty(name.trim_end_matches(".git")),
        None => FALLBACK_NAME.to_string(),
    }
}

/// Label for a local directory: its final component
pub fn local_name(path: &Path) -> String {
    let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Label used in document file names for a source
pub fn source_label(source: &Source) -> String {
    match source {
        Source::Local(path) => local_name(path),
        Source::Remote(id) => repo_name(id),
    }
}

/// `<label>-concat-<YYYYmmdd-HHMMSS>.txt`
pub fn output_file_name(label: &str, now: DateTime<Local>) -> String {
    format!("{}-concat-{}.txt", label, now.format("%Y%m%d-%H%M%S"))
}

fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s).trim_end_matches(".git")
}

fn non_empty(name: &str) -> String {
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.to_string()
    }
}
