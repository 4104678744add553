//! File selection engine
//!
//! Walks a source tree once and splits its files into an included and an
//! excluded set. A file is excluded when, in order:
//!
//! 1. its first 512 bytes contain a null byte (binary),
//! 2. it matches a built-in or user exclusion pattern,
//! 3. inclusion patterns are present and none of them match.
//!
//! Dry-run and collect scans share the same classification, so the
//! included set never depends on the mode.

pub mod pattern;
pub mod pipeline;
pub mod spec;
pub mod text;

pub use pattern::{glob_to_regex, Pattern, PatternKind};
pub use pipeline::{scan, Exclusion, FileRecord, ScanMode, ScanResult};
pub use spec::{FilterSpec, DEFAULT_EXCLUSIONS};
pub use text::is_text_file;
