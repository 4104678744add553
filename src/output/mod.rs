//! Document output: rendering, naming, previews

pub mod concat;
pub mod naming;
pub mod tree;

pub use concat::{estimate_tokens, render_concatenation, write_output, Concatenation, OUTPUT_SUBDIR};
pub use naming::{local_name, output_file_name, repo_name, source_label};
pub use tree::{render_tree, TreeLine, DEFAULT_TREE_DEPTH};

use chrono::Duration;

/// Human-readable age, truncated to the largest whole unit
pub fn format_age(age: Duration) -> String {
    let secs = age.num_seconds();
    if secs < 1 {
        return "just now".to_string();
    }

    let (n, unit) = if secs < 60 {
        (secs, "second")
    } else if secs < 3600 {
        (secs / 60, "minute")
    } else {
        (secs / 3600, "hour")
    };

    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
