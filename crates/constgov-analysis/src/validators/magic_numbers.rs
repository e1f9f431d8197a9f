//! Magic-number detection: bare integer literals outside constants files
//! whose value belongs to a known enumeration.
//!
//! The extractor already drops literals inside `const` declarations and
//! index expressions, so this stage only filters by file and value.

use std::collections::BTreeSet;

use crate::parsers::{FileFacts, NumericLiteral};
use crate::rules::RuleSet;
use crate::scanner::is_constants_file;

pub struct MagicNumberDetector {
    suspicious: BTreeSet<i64>,
    constants_suffix: String,
}

impl MagicNumberDetector {
    pub fn new(suspicious: BTreeSet<i64>, constants_suffix: &str) -> Self {
        Self {
            suspicious,
            constants_suffix: constants_suffix.to_string(),
        }
    }

    pub fn from_rules(rules: &RuleSet, constants_suffix: &str) -> Self {
        Self::new(rules.magic_values.clone(), constants_suffix)
    }

    /// Suspicious literals across the corpus, ordered by (file, line, column).
    pub fn detect(&self, files: &[FileFacts]) -> Vec<NumericLiteral> {
        let mut results: Vec<NumericLiteral> =
            files.iter().flat_map(|f| self.detect_file(f)).collect();
        results.sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));
        results
    }

    /// Suspicious literals in one file. Constants files yield nothing.
    pub fn detect_file(&self, facts: &FileFacts) -> Vec<NumericLiteral> {
        if is_constants_file(&facts.path, &self.constants_suffix) {
            return Vec::new();
        }
        facts
            .literals
            .iter()
            .filter(|l| self.suspicious.contains(&l.value))
            .cloned()
            .collect()
    }
}
