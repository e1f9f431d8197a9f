//! Reference alignment: every mapped local constant must exist in the corpus
//! with exactly the reference value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parsers::{ConstantDefinition, ConstantValue};
use crate::rules::ReferenceTable;

/// Value found for a mapped constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ObservedValue {
    Value(i64),
    /// Defined with a non-literal expression.
    Unparsed(String),
    /// Not defined anywhere in the corpus.
    Missing,
}

impl ObservedValue {
    /// Rendered value of a missing constant.
    pub const MISSING_SENTINEL: i64 = -1;
}

impl fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Unparsed(expr) => write!(f, "unparsed({expr})"),
            Self::Missing => write!(f, "{} (missing)", Self::MISSING_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisalignedMapping {
    pub constant_name: String,
    pub reference_enum: String,
    pub expected: i64,
    pub actual: ObservedValue,
    /// Location of the offending definition; `None` when missing.
    pub file: Option<String>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Mapped constant names that matched.
    pub aligned: Vec<String>,
    pub misaligned: Vec<MisalignedMapping>,
}

impl AlignmentReport {
    pub fn passed(&self) -> bool {
        self.misaligned.is_empty()
    }
}

pub struct AlignmentValidator<'a> {
    table: &'a ReferenceTable,
}

impl<'a> AlignmentValidator<'a> {
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self { table }
    }

    /// Check each mapping entry against the scanned definitions. Each entry
    /// yields at most one misalignment: the first offending definition in
    /// corpus order. Entries with no definition at all are reported as missing.
    pub fn validate(&self, constants: &[&ConstantDefinition]) -> AlignmentReport {
        let mut report = AlignmentReport::default();
        for entry in self.table.entries() {
            let name = entry.local_constant_name.as_str();
            let mut definitions = constants.iter().filter(|c| c.name == name).peekable();

            if definitions.peek().is_none() {
                report.misaligned.push(MisalignedMapping {
                    constant_name: name.to_string(),
                    reference_enum: entry.reference_enum_name.clone(),
                    expected: entry.reference_value,
                    actual: ObservedValue::Missing,
                    file: None,
                    line: None,
                });
                continue;
            }

            let offending = definitions.find_map(|c| {
                let actual = match &c.value {
                    ConstantValue::Int(v) if *v == entry.reference_value => return None,
                    ConstantValue::Int(v) => ObservedValue::Value(*v),
                    ConstantValue::Unparsed(expr) => ObservedValue::Unparsed(expr.clone()),
                };
                Some(MisalignedMapping {
                    constant_name: name.to_string(),
                    reference_enum: entry.reference_enum_name.clone(),
                    expected: entry.reference_value,
                    actual,
                    file: Some(c.file.clone()),
                    line: Some(c.line),
                })
            });

            match offending {
                Some(misaligned) => report.misaligned.push(misaligned),
                None => report.aligned.push(name.to_string()),
            }
        }

        tracing::debug!(
            aligned = report.aligned.len(),
            misaligned = report.misaligned.len(),
            "reference alignment checked"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::AttachedComment;
    use crate::rules::ReferenceEnumMapping;

    fn constant(name: &str, value: ConstantValue, file: &str) -> ConstantDefinition {
        ConstantDefinition {
            name: name.to_string(),
            value,
            file: file.to_string(),
            line: 3,
            package: "consts".to_string(),
            comment: AttachedComment::default(),
            reference_tag: None,
        }
    }

    fn table() -> ReferenceTable {
        ReferenceTable::new(vec![ReferenceEnumMapping::new(
            "StatusEnum.ACTIVE",
            "StatusActive",
            2,
            "启用",
        )])
        .unwrap()
    }

    #[test]
    fn test_value_mismatch() {
        let table = table();
        let defs = [constant("StatusActive", ConstantValue::Int(1), "status_constants.go")];
        let refs: Vec<&ConstantDefinition> = defs.iter().collect();

        let report = AlignmentValidator::new(&table).validate(&refs);
        assert!(!report.passed());
        assert_eq!(report.misaligned.len(), 1);
        let m = &report.misaligned[0];
        assert_eq!(m.constant_name, "StatusActive");
        assert_eq!(m.actual, ObservedValue::Value(1));
        assert_eq!(m.expected, 2);
    }

    #[test]
    fn test_aligned() {
        let table = table();
        let defs = [constant("StatusActive", ConstantValue::Int(2), "status_constants.go")];
        let refs: Vec<&ConstantDefinition> = defs.iter().collect();

        let report = AlignmentValidator::new(&table).validate(&refs);
        assert!(report.passed());
        assert_eq!(report.aligned, vec!["StatusActive".to_string()]);
    }

    #[test]
    fn test_missing_uses_sentinel() {
        let table = table();
        let defs = [constant("StatusOther", ConstantValue::Int(2), "status_constants.go")];
        let refs: Vec<&ConstantDefinition> = defs.iter().collect();

        let report = AlignmentValidator::new(&table).validate(&refs);
        assert_eq!(report.misaligned[0].actual, ObservedValue::Missing);
        assert_eq!(report.misaligned[0].actual.to_string(), "-1 (missing)");
    }

    #[test]
    fn test_unparsed_never_passes() {
        let table = table();
        let defs = [constant(
            "StatusActive",
            ConstantValue::Unparsed("iota".to_string()),
            "status_constants.go",
        )];
        let refs: Vec<&ConstantDefinition> = defs.iter().collect();

        let report = AlignmentValidator::new(&table).validate(&refs);
        assert_eq!(
            report.misaligned[0].actual,
            ObservedValue::Unparsed("iota".to_string())
        );
    }

    #[test]
    fn test_one_finding_per_entry() {
        let table = table();
        let defs = [
            constant("StatusActive", ConstantValue::Int(1), "a.go"),
            constant("StatusActive", ConstantValue::Int(3), "b.go"),
        ];
        let refs: Vec<&ConstantDefinition> = defs.iter().collect();

        let report = AlignmentValidator::new(&table).validate(&refs);
        assert_eq!(report.misaligned.len(), 1);
        assert_eq!(report.misaligned[0].file.as_deref(), Some("a.go"));
    }

    #[test]
    fn test_no_constants_reports_every_entry_missing() {
        let table = table();
        let report = AlignmentValidator::new(&table).validate(&[]);
        assert!(!report.passed());
        assert!(report.aligned.is_empty());
        assert_eq!(report.misaligned.len(), table.len());
        assert!(report
            .misaligned
            .iter()
            .all(|m| m.actual == ObservedValue::Missing && m.file.is_none()));
    }
}
