//! Source discovery: sequential walk with gitignore-style ignores,
//! suffix and generated-file exclusion, then per-file fact extraction.

mod ignores;
mod types;
mod walker;

pub use ignores::{IgnorePatterns, DEFAULT_IGNORE_DIRS, IGNORE_FILE};
pub use types::{ScanFailure, ScanOutcome, ScanStats, SourceFile};
pub use walker::{display_path, extract_file, is_constants_file, is_generated, read_source, Scanner};
