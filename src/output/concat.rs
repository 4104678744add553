//! Concatenated document rendering and writing

use crate::error::{RepocatError, RepocatResult};
use crate::filter::FileRecord;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Subdirectory of the output directory that receives documents
pub const OUTPUT_SUBDIR: &str = "repo-concat-output";

/// A rendered document
#[derive(Debug, Clone)]
pub struct Concatenation {
    /// Full document text
    pub content: String,
    /// Files written into the document
    pub files: usize,
    /// Files skipped because they could not be read
    pub skipped: Vec<String>,
}

/// Render `files` as one document.
///
/// Each file becomes a `# File: <relative>` heading followed by its content
/// in a fenced block. Files that fail to read are skipped with a warning and
/// do not count towards the header total. `on_file` is called once per file,
/// before it is read.
pub fn render_concatenation<F>(
    files: &[FileRecord],
    generated_at: DateTime<Local>,
    mut on_file: F,
) -> Concatenation
where
    F: FnMut(&FileRecord),
{
    let mut body = String::new();
    let mut written = 0;
    let mut skipped = Vec::new();

    for file in files {
        on_file(file);

        let bytes = match std::fs::read(&file.absolute_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {}: {}", file.relative_path, e);
                skipped.push(file.relative_path.clone());
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        body.push_str("# File: ");
        body.push_str(&file.relative_path);
        body.push_str("\n```\n");
        body.push_str(&content);
        if !content.ends_with('\n') {
            body.push('\n');
        }
        body.push_str("```\n\n");
        written += 1;
    }

    let mut content = format!(
        "# Repository Concatenation\n# Generated on: {}\n# Total files: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        written
    );
    content.push_str(&body);

    debug!("Rendered {} files ({} skipped)", written, skipped.len());
    Concatenation {
        content,
        files: written,
        skipped,
    }
}

/// Rough token count: four tokens per three whitespace-separated words
pub fn estimate_tokens(content: &str) -> usize {
    content.split_whitespace().count() * 4 / 3
}

/// Write `content` as `<output_dir>/repo-concat-output/<file_name>`
pub fn write_output(output_dir: &Path, file_name: &str, content: &str) -> RepocatResult<PathBuf> {
    let dir = output_dir.join(OUTPUT_SUBDIR);
    std::fs::create_dir_all(&dir)
        .map_err(|e| RepocatError::io(format!("creating output directory {}", dir.display()), e))?;

    let path = dir.join(file_name);
    std::fs::write(&path, content)
        .map_err(|e| RepocatError::io(format!("writing output file {}", path.display()), e))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}
