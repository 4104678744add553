//! Binary content detection

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes sampled per file
pub const SAMPLE_SIZE: u64 = 512;

/// Check whether a file looks like text.
///
/// Samples the first `SAMPLE_SIZE` bytes; any null byte marks the file as
/// binary. A file that cannot be opened or read is treated as not text.
pub fn is_text_file(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };

    let mut sample = Vec::with_capacity(SAMPLE_SIZE as usize);
    if file.take(SAMPLE_SIZE).read_to_end(&mut sample).is_err() {
        return false;
    }

    !sample.contains(&0)
}
