//! DeclarationExtractor trait: the contract every source grammar implements.

use std::path::Path;

use constgov_core::errors::ParseError;

use super::types::FileFacts;

/// Extracts constant, literal, function and variable facts from one file.
///
/// `display_path` is the path recorded in the facts (root-relative in a
/// full run); `path` is only used for error reporting.
pub trait DeclarationExtractor: Send + Sync {
    /// Human-readable grammar name.
    fn language(&self) -> &'static str;

    /// File extensions this extractor handles, without the dot.
    fn extensions(&self) -> &[&str];

    /// Parse `source` and extract its facts. Any syntax error fails the file.
    fn extract(&self, source: &str, path: &Path, display_path: &str) -> Result<FileFacts, ParseError>;

    /// Whether this extractor handles `path`.
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}
