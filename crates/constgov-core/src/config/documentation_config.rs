//! Documentation validator configuration.

use serde::{Deserialize, Serialize};

/// Markers that count as a cross-reference to the canonical enumeration.
pub const DEFAULT_CITATION_MARKERS: &[&str] = &["@see", "参考", "对应"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocumentationConfig {
    /// Minimum comment length (in characters) for domain-significant constants. Default: 4.
    pub min_comment_chars: Option<usize>,
    /// Citation markers. Empty means the defaults.
    pub citation_markers: Vec<String>,
}

impl DocumentationConfig {
    pub fn effective_min_comment_chars(&self) -> usize {
        self.min_comment_chars.unwrap_or(4)
    }

    pub fn effective_citation_markers(&self) -> Vec<String> {
        if self.citation_markers.is_empty() {
            DEFAULT_CITATION_MARKERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.citation_markers.clone()
        }
    }
}
