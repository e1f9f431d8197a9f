//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// File-name suffix that marks a constants file.
pub const DEFAULT_CONSTANTS_SUFFIX: &str = "_constants.go";

/// Generated or test sources that would only produce false positives.
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[
    "_test.go",
    ".pb.go",
    ".pb.gw.go",
    "_gen.go",
    "_generated.go",
    ".gen.go",
    "_mock.go",
];

/// Default max file size: 2MB. Hand-written Go sources never get close.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Configuration for source discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Suffix identifying constants files. Default: `_constants.go`.
    pub constants_suffix: Option<String>,
    /// File suffixes excluded from the scan. Empty means the defaults.
    pub excluded_suffixes: Vec<String>,
    /// Extra gitignore-style patterns, on top of the built-in ignores.
    pub extra_ignore: Vec<String>,
    /// Skip files carrying the `Code generated ... DO NOT EDIT.` header. Default: true.
    pub skip_generated: Option<bool>,
    /// Maximum file size in bytes. Default: 2MB.
    pub max_file_size: Option<u64>,
    /// Follow symbolic links while walking. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    pub fn effective_constants_suffix(&self) -> &str {
        self.constants_suffix
            .as_deref()
            .unwrap_or(DEFAULT_CONSTANTS_SUFFIX)
    }

    pub fn effective_excluded_suffixes(&self) -> Vec<String> {
        if self.excluded_suffixes.is_empty() {
            DEFAULT_EXCLUDED_SUFFIXES.iter().map(|s| s.to_string()).collect()
        } else {
            self.excluded_suffixes.clone()
        }
    }

    pub fn effective_skip_generated(&self) -> bool {
        self.skip_generated.unwrap_or(true)
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
