//! Documentation completeness for constants defined in constants files.

use serde::{Deserialize, Serialize};

use crate::parsers::{ConstantDefinition, FileFacts};
use crate::rules::{CategoryTable, ReferenceTable};
use crate::scanner::is_constants_file;

pub const MISSING_COMMENT: &str = "missing comment";
pub const MISSING_CHINESE: &str = "missing chinese description";
pub const MISSING_CITATION: &str = "missing reference citation";
pub const COMMENT_TOO_SHORT: &str = "comment too short";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationValidation {
    pub constant_name: String,
    pub file: String,
    pub line: u32,
    pub has_documentation: bool,
    pub comment_lines: Vec<String>,
    pub has_reference_citation: bool,
    pub missing_elements: Vec<String>,
}

impl DocumentationValidation {
    pub fn is_complete(&self) -> bool {
        self.missing_elements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationReport {
    pub validations: Vec<DocumentationValidation>,
}

impl DocumentationReport {
    /// True when every checked constant is fully documented. Advisory in
    /// the aggregate report; usable as a separate CI gate.
    pub fn passed(&self) -> bool {
        self.validations.iter().all(DocumentationValidation::is_complete)
    }

    pub fn documented(&self) -> usize {
        self.validations.iter().filter(|v| v.has_documentation).count()
    }

    pub fn undocumented(&self) -> usize {
        self.validations.len() - self.documented()
    }

    pub fn incomplete(&self) -> impl Iterator<Item = &DocumentationValidation> {
        self.validations.iter().filter(|v| !v.is_complete())
    }
}

pub struct DocumentationValidator<'a> {
    categories: &'a CategoryTable,
    reference: &'a ReferenceTable,
    constants_suffix: String,
    min_comment_chars: usize,
    citation_markers: Vec<String>,
}

impl<'a> DocumentationValidator<'a> {
    pub fn new(
        categories: &'a CategoryTable,
        reference: &'a ReferenceTable,
        constants_suffix: &str,
        min_comment_chars: usize,
        citation_markers: Vec<String>,
    ) -> Self {
        Self {
            categories,
            reference,
            constants_suffix: constants_suffix.to_string(),
            min_comment_chars,
            citation_markers,
        }
    }

    /// One validation per constant in a constants file, in corpus order.
    pub fn validate(&self, files: &[FileFacts]) -> DocumentationReport {
        let validations = files
            .iter()
            .filter(|f| is_constants_file(&f.path, &self.constants_suffix))
            .flat_map(|f| f.constants.iter())
            .map(|c| self.check(c))
            .collect();
        DocumentationReport { validations }
    }

    fn check(&self, constant: &ConstantDefinition) -> DocumentationValidation {
        let comment_lines = constant.comment.lines();
        let text = comment_lines.join(" ");
        let has_documentation = !comment_lines.is_empty();
        let has_reference_citation = has_documentation && self.cites_reference(constant, &text);

        let mut missing_elements = Vec::new();
        if !has_documentation {
            missing_elements.push(MISSING_COMMENT.to_string());
        } else {
            if !contains_cjk(&text) {
                missing_elements.push(MISSING_CHINESE.to_string());
            }
            if self.categories.is_domain_significant(&constant.name) {
                if !has_reference_citation {
                    missing_elements.push(MISSING_CITATION.to_string());
                }
                let length = text.chars().filter(|c| !c.is_whitespace()).count();
                if length < self.min_comment_chars {
                    missing_elements.push(COMMENT_TOO_SHORT.to_string());
                }
            }
        }

        DocumentationValidation {
            constant_name: constant.name.clone(),
            file: constant.file.clone(),
            line: constant.line,
            has_documentation,
            comment_lines,
            has_reference_citation,
            missing_elements,
        }
    }

    fn cites_reference(&self, constant: &ConstantDefinition, text: &str) -> bool {
        if constant.reference_tag.is_some()
            || self.citation_markers.iter().any(|m| text.contains(m.as_str()))
        {
            return true;
        }
        self.reference
            .get(&constant.name)
            .is_some_and(|entry| text.contains(entry.reference_enum_name.as_str()))
    }
}

/// Whether the text holds a CJK unified ideograph (basic block or extension A).
pub fn contains_cjk(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{AttachedComment, ConstantValue};
    use crate::rules::default_reference_table;

    fn constant(name: &str, doc: &[&str]) -> ConstantDefinition {
        ConstantDefinition {
            name: name.to_string(),
            value: ConstantValue::Int(0),
            file: "status_constants.go".to_string(),
            line: 5,
            package: "consts".to_string(),
            comment: AttachedComment {
                doc: doc.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
            reference_tag: None,
        }
    }

    fn validate(constants: Vec<ConstantDefinition>, path: &str) -> DocumentationReport {
        let categories = CategoryTable::standard().unwrap();
        let reference = default_reference_table().unwrap();
        let validator = DocumentationValidator::new(
            &categories,
            &reference,
            "_constants.go",
            4,
            vec!["@see".to_string(), "参考".to_string()],
        );
        validator.validate(&[FileFacts {
            path: path.to_string(),
            constants,
            ..Default::default()
        }])
    }

    #[test]
    fn test_missing_comment_is_exclusive() {
        let report = validate(vec![constant("OrderStatusPending", &[])], "status_constants.go");
        let v = &report.validations[0];
        assert!(!v.has_documentation);
        assert_eq!(v.missing_elements, vec![MISSING_COMMENT]);
        assert!(!report.passed());
    }

    #[test]
    fn test_complete_documentation() {
        let report = validate(
            vec![constant("OrderStatusPendingPayment", &["待付款 @see OrderStatusEnum.PENDING_PAYMENT"])],
            "status_constants.go",
        );
        assert!(report.passed());
        assert!(report.validations[0].has_reference_citation);
    }

    #[test]
    fn test_mapped_enum_name_counts_as_citation() {
        let report = validate(
            vec![constant("OrderStatusClosed", &["已关闭，OrderStatusEnum.CLOSED"])],
            "status_constants.go",
        );
        assert!(report.validations[0].has_reference_citation);
    }

    #[test]
    fn test_domain_constant_needs_citation_and_length() {
        let report = validate(vec![constant("PayTypeAlipay", &["支付"])], "type_constants.go");
        assert_eq!(
            report.validations[0].missing_elements,
            vec![MISSING_CITATION, COMMENT_TOO_SHORT]
        );
    }

    #[test]
    fn test_limit_constant_needs_only_chinese() {
        let report = validate(vec![constant("MaxPageSize", &["page size cap"])], "limit_constants.go");
        assert_eq!(report.validations[0].missing_elements, vec![MISSING_CHINESE]);

        let report = validate(vec![constant("MaxPageSize", &["分页"])], "limit_constants.go");
        assert!(report.passed());
    }

    #[test]
    fn test_non_constants_files_skipped() {
        let report = validate(vec![constant("OrderStatusPending", &[])], "service.go");
        assert!(report.validations.is_empty());
        assert!(report.passed());
    }

    #[test]
    fn test_cjk_ranges() {
        assert!(contains_cjk("订单"));
        assert!(contains_cjk("\u{3400}"));
        assert!(!contains_cjk("order カタカナ"));
    }
}
