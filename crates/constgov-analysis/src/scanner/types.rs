//! Scanner types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parsers::FileFacts;

/// A discovered, eligible source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Root-relative, `/`-separated.
    pub relative: String,
    pub size: u64,
}

/// A file that could not be read or parsed. The rest of the scan continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub file: String,
    pub code: String,
    pub message: String,
}

/// Scan counters. Deterministic for a given tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub files_excluded: usize,
    pub files_generated: usize,
    pub files_too_large: usize,
    pub dirs_ignored: usize,
    pub unparsed_constants: usize,
}

/// Everything a scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub root: String,
    /// Per-file facts, sorted by path.
    pub files: Vec<FileFacts>,
    pub failures: Vec<ScanFailure>,
    /// Non-blocking observations (unparsed constant values, unreadable directories).
    pub warnings: Vec<String>,
    pub stats: ScanStats,
}

impl ScanOutcome {
    pub fn constant_count(&self) -> usize {
        self.files.iter().map(|f| f.constants.len()).sum()
    }
}
