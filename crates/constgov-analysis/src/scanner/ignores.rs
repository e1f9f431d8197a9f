//! Gitignore-style ignore rules for Go source trees.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Directories never worth descending into.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Dependencies
    "vendor",
    "node_modules",
    // Go test data is not compiled
    "testdata",
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDE/Editor
    ".idea",
    ".vscode",
    // Caches
    ".cache",
];

/// Project-local ignore file, same syntax as `.gitignore`.
pub const IGNORE_FILE: &str = ".constgovignore";

/// Compiled ignore rules for one scan root.
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Defaults, then extra patterns, then the root `.constgovignore` and `.gitignore`.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "invalid default ignore pattern");
            }
        }

        for pattern in extra_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern, skipped");
            }
        }

        for file in [IGNORE_FILE, ".gitignore"] {
            let path = root.join(file);
            if path.is_file() {
                if let Some(e) = builder.add(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not read ignore file");
                }
            }
        }

        let gitignore = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignore rules failed to compile, ignoring nothing");
            Gitignore::empty()
        });
        Self { gitignore }
    }

    /// Whether a root-relative path is ignored.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(relative, is_dir).is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_ignore_vendor_and_testdata() {
        let dir = tempfile::tempdir().unwrap();
        let patterns = IgnorePatterns::new(dir.path(), &[]);

        assert!(patterns.is_ignored(Path::new("vendor"), true));
        assert!(patterns.is_ignored(Path::new("internal/testdata"), true));
        assert!(!patterns.is_ignored(Path::new("internal/order"), true));
        assert!(!patterns.is_ignored(Path::new("internal/order/status_constants.go"), false));
    }

    #[test]
    fn test_extra_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let patterns = IgnorePatterns::new(dir.path(), &["legacy/".to_string(), "*_old.go".to_string()]);

        assert!(patterns.is_ignored(Path::new("legacy"), true));
        assert!(patterns.is_ignored(Path::new("pkg/order_old.go"), false));
        assert!(!patterns.is_ignored(Path::new("pkg/order.go"), false));
    }

    #[test]
    fn test_ignore_files_in_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "gen/\n").unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "scratch.go\n").unwrap();
        let patterns = IgnorePatterns::new(dir.path(), &[]);

        assert!(patterns.is_ignored(Path::new("gen"), true));
        assert!(patterns.is_ignored(Path::new("scratch.go"), false));
    }
}
