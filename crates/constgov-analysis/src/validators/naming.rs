//! Naming and placement conventions.
//!
//! Classified constants must match their category pattern and live in the
//! category's designated file. Exported validator functions and exported
//! allowed-value collections follow fixed prefix/suffix conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parsers::{FileFacts, FunctionDecl, VariableDecl};
use crate::rules::{CategoryTable, NamingRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    ConstantPattern,
    ConstantPlacement,
    ValidatorPrefix,
    PredicatePrefix,
    CollectionSuffix,
}

impl ViolationType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstantPattern => "constant-pattern",
            Self::ConstantPlacement => "constant-placement",
            Self::ValidatorPrefix => "validator-prefix",
            Self::PredicatePrefix => "predicate-prefix",
            Self::CollectionSuffix => "collection-suffix",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingViolation {
    pub violation_type: ViolationType,
    pub identifier: String,
    pub file: String,
    pub line: u32,
    pub expected: String,
    pub actual: String,
    pub description: String,
}

impl NamingViolation {
    pub fn is_placement(&self) -> bool {
        self.violation_type == ViolationType::ConstantPlacement
    }
}

pub struct NamingValidator<'a> {
    categories: &'a CategoryTable,
    rules: &'a NamingRules,
}

impl<'a> NamingValidator<'a> {
    pub fn new(categories: &'a CategoryTable, rules: &'a NamingRules) -> Self {
        Self { categories, rules }
    }

    /// Violations across the corpus, ordered by (file, line, identifier).
    pub fn validate(&self, files: &[FileFacts]) -> Vec<NamingViolation> {
        let mut violations: Vec<NamingViolation> =
            files.iter().flat_map(|f| self.validate_file(f)).collect();
        sort_violations(&mut violations);
        violations
    }

    /// Violations in one file, independent of the rest of the corpus.
    pub fn validate_file(&self, facts: &FileFacts) -> Vec<NamingViolation> {
        let mut violations = Vec::new();
        let file_name = facts.file_name();

        for constant in &facts.constants {
            let Some(class) = self.categories.classify(&constant.name) else {
                continue;
            };
            let Some(spec) = self.categories.spec(class.category) else {
                continue;
            };

            if !spec.pattern.is_match(&constant.name) {
                violations.push(NamingViolation {
                    violation_type: ViolationType::ConstantPattern,
                    identifier: constant.name.clone(),
                    file: constant.file.clone(),
                    line: constant.line,
                    expected: spec.pattern.as_str().to_string(),
                    actual: constant.name.clone(),
                    description: format!(
                        "{} constant {} does not match the {} naming pattern",
                        class.category, constant.name, class.category
                    ),
                });
            }

            if file_name != spec.designated_file {
                violations.push(NamingViolation {
                    violation_type: ViolationType::ConstantPlacement,
                    identifier: constant.name.clone(),
                    file: constant.file.clone(),
                    line: constant.line,
                    expected: spec.designated_file.clone(),
                    actual: file_name.to_string(),
                    description: format!(
                        "{} constant {} must be defined in {}",
                        class.category, constant.name, spec.designated_file
                    ),
                });
            }
        }

        violations.extend(facts.functions.iter().filter_map(|f| self.check_function(f)));
        violations.extend(facts.variables.iter().filter_map(|v| self.check_variable(v)));
        sort_violations(&mut violations);
        violations
    }

    fn check_function(&self, function: &FunctionDecl) -> Option<NamingViolation> {
        let name = function.name.as_str();
        if !is_exported(name) {
            return None;
        }
        let (marker_start, marker_end) = self.validator_marker(name)?;
        let result = function.result.as_deref().map(str::trim)?;

        let (violation_type, prefix, kind) = match result {
            "error" => (ViolationType::ValidatorPrefix, &self.rules.validator_prefix, "validator"),
            "bool" => (ViolationType::PredicatePrefix, &self.rules.predicate_prefix, "predicate"),
            _ => return None,
        };
        if name.starts_with(prefix.as_str()) {
            return None;
        }

        let subject = validator_subject(name, marker_start, marker_end);
        let expected = format!("{prefix}{subject}");
        Some(NamingViolation {
            violation_type,
            identifier: name.to_string(),
            file: function.file.clone(),
            line: function.line,
            description: format!(
                "{kind} {name} returning {result} should be named {expected}"
            ),
            expected,
            actual: name.to_string(),
        })
    }

    fn check_variable(&self, variable: &VariableDecl) -> Option<NamingViolation> {
        let name = variable.name.as_str();
        let suffix = self.rules.collection_suffix.as_str();
        if !is_exported(name) || name.ends_with(suffix) {
            return None;
        }
        let prefix = self.rules.collection_prefix(name)?;

        let expected = format!("{}{suffix}", singular(name));
        Some(NamingViolation {
            violation_type: ViolationType::CollectionSuffix,
            identifier: name.to_string(),
            file: variable.file.clone(),
            line: variable.line,
            description: format!(
                "collection {name} starts with {prefix} and must end with {suffix}"
            ),
            expected,
            actual: name.to_string(),
        })
    }

    /// Byte span of the validator marker (`Validate` or `Valid`) in a name.
    /// The marker must end at a word boundary, so `Validator` and
    /// `Validation` are not validators.
    fn validator_marker(&self, name: &str) -> Option<(usize, usize)> {
        let marker = self.rules.validator_marker.as_str();
        let long = self.rules.validator_prefix.as_str();
        name.match_indices(marker).find_map(|(start, _)| {
            let rest = &name[start..];
            [long, marker]
                .into_iter()
                .filter(|m| rest.starts_with(m))
                .find(|m| !rest[m.len()..].starts_with(|c: char| c.is_ascii_lowercase()))
                .map(|m| (start, start + m.len()))
        })
    }
}

fn sort_violations(violations: &mut [NamingViolation]) {
    violations.sort_by(|a, b| {
        (&a.file, a.line, &a.identifier, a.violation_type)
            .cmp(&(&b.file, b.line, &b.identifier, b.violation_type))
    });
}

fn is_exported(name: &str) -> bool {
    name.starts_with(|c: char| c.is_uppercase())
}

/// What a validator checks: the name with the marker and any leading
/// `Is`/`Check` removed. `CheckOrderValid` → `Order`.
fn validator_subject(name: &str, marker_start: usize, marker_end: usize) -> String {
    let joined = format!("{}{}", &name[..marker_start], &name[marker_end..]);
    ["Is", "Check"]
        .iter()
        .find_map(|p| {
            joined
                .strip_prefix(p)
                .filter(|rest| rest.starts_with(|c: char| c.is_uppercase()))
        })
        .unwrap_or(joined.as_str())
        .to_string()
}

/// Drop an English plural ending: `Statuses` → `Status`, `Types` → `Type`.
fn singular(name: &str) -> &str {
    if let Some(stem) = name.strip_suffix("es") {
        if stem.ends_with('s') || stem.ends_with('x') {
            return stem;
        }
    }
    name.strip_suffix('s').unwrap_or(name)
}
