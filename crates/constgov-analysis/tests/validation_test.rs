//! End-to-end validation runs over temporary Go source trees.

use std::fs;
use std::path::Path;

use constgov_analysis::rules::{
    default_reference_table, CategoryTable, ConstantCategory, NamingRules, ReferenceEnumMapping,
    ReferenceTable, RuleSet,
};
use constgov_analysis::tool::{render_itemized, Statistics};
use constgov_analysis::validators::{DuplicateKind, ObservedValue, ViolationType};
use constgov_analysis::ValidationTool;
use constgov_core::config::ConstgovConfig;
use constgov_core::errors::{ConstgovErrorCode, ParseError, ScanError, ValidationError};
use constgov_core::{Cancellable, CancellationToken};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn standard_tool() -> ValidationTool {
    ValidationTool::new(ConstgovConfig::default(), RuleSet::standard().unwrap())
}

/// A corpus that satisfies every rule of the standard rule set.
fn write_clean_mall(root: &Path) {
    let categories = CategoryTable::standard().unwrap();
    let table = default_reference_table().unwrap();
    let mut files: Vec<(&str, String)> = vec![
        ("internal/consts/status_constants.go", String::new()),
        ("internal/consts/type_constants.go", String::new()),
        ("internal/consts/scope_constants.go", String::new()),
    ];
    for entry in table.entries() {
        let category = categories
            .classify(&entry.local_constant_name)
            .unwrap()
            .category;
        let index = match category {
            ConstantCategory::Status => 0,
            ConstantCategory::Type => 1,
            _ => 2,
        };
        files[index].1.push_str(&format!(
            "\t// {} @see {}\n\t{} = {}\n",
            entry.description, entry.reference_enum_name, entry.local_constant_name, entry.reference_value
        ));
    }
    for (path, body) in files {
        write(root, path, &format!("package consts\n\nconst (\n{body})\n"));
    }
}

#[test]
fn test_clean_corpus_passes() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_mall(dir.path());
    write(
        dir.path(),
        "internal/order/service.go",
        "package order\n\nfunc ValidateOrderStatus(s int) error {\n\tif s == 4 {\n\t\treturn nil\n\t}\n\treturn nil\n}\n",
    );

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    assert!(report.overall_passed, "{}", render_itemized(&report));
    assert!(report.documentation.passed());
    assert_eq!(report.statistics.constants_found, 26);
    assert_eq!(report.statistics.aligned_constants, 26);
    // Magic numbers are warnings and never fail the run.
    assert_eq!(report.validation.magic_numbers.len(), 1);
    assert_eq!(report.validation.magic_numbers[0].value, 4);
    assert_eq!(report.validation.magic_numbers[0].line, 4);
}

#[test]
fn test_value_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "status_constants.go",
        "package consts\n\n// 启用状态 @see StatusEnum.ACTIVE\nconst StatusActive = 1\n",
    );
    let reference = ReferenceTable::new(vec![ReferenceEnumMapping::new(
        "StatusEnum.ACTIVE",
        "StatusActive",
        2,
        "启用",
    )])
    .unwrap();
    let rules = RuleSet::from_tables(CategoryTable::standard().unwrap(), reference, NamingRules::default());

    let report = ValidationTool::new(ConstgovConfig::default(), rules)
        .run_comprehensive_validation(dir.path())
        .unwrap();

    assert!(!report.overall_passed);
    assert!(!report.validation.passed);
    assert_eq!(report.validation.misaligned_mappings.len(), 1);
    let m = &report.validation.misaligned_mappings[0];
    assert_eq!(m.constant_name, "StatusActive");
    assert_eq!(m.actual, ObservedValue::Value(1));
    assert_eq!(m.expected, 2);
}

#[test]
fn test_redefinition_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a/a.go", "package a\n\nconst Foo = 5\n");
    write(dir.path(), "b/b.go", "package b\n\nconst Foo = 5\n");

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    assert!(!report.overall_passed);
    assert_eq!(report.duplicates.len(), 1);
    let duplicate = &report.duplicates[0];
    assert_eq!(duplicate.kind, DuplicateKind::NameRedefinition);
    assert_eq!(duplicate.name, "Foo");
    assert_eq!(duplicate.occurrences, 2);
    assert_eq!(duplicate.defining_files, vec!["a/a.go", "b/b.go"]);
}

#[test]
fn test_undocumented_constant() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "status_constants.go",
        "package consts\n\nconst OrderStatusPending = 0\n",
    );

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    let validation = report
        .documentation
        .validations
        .iter()
        .find(|v| v.constant_name == "OrderStatusPending")
        .unwrap();
    assert!(!validation.has_documentation);
    assert_eq!(validation.missing_elements, vec!["missing comment"]);
}

#[test]
fn test_single_file_ignores_rest_of_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_mall(dir.path());
    write(dir.path(), "other/a.go", "package other\n\nconst Foo = 1\n");
    write(dir.path(), "other/b.go", "package other2\n\nconst Foo = 2\n");
    write(
        dir.path(),
        "internal/consts/limit_constants.go",
        "package consts\n\n// 分页上限\nconst MaxPageSize = 100\n\n// 默认\nconst Default_Page = 1\n",
    );

    let report = standard_tool()
        .validate_specific_file(&dir.path().join("internal/consts/limit_constants.go"))
        .unwrap();

    assert!(!report.passed);
    assert_eq!(report.naming_violations.len(), 1);
    assert_eq!(report.naming_violations[0].identifier, "Default_Page");
    assert_eq!(
        report.naming_violations[0].violation_type,
        ViolationType::ConstantPattern
    );
}

#[test]
fn test_single_file_syntax_error_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.go", "package broken\n\nfunc (\n");

    let err = standard_tool()
        .validate_specific_file(&dir.path().join("broken.go"))
        .unwrap_err();
    assert!(matches!(err, ValidationError::Parse(_)));
}

#[test]
fn test_empty_root_passes_with_zero_statistics() {
    let dir = tempfile::tempdir().unwrap();

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    assert!(report.overall_passed);
    assert_eq!(report.statistics, Statistics::default());
    assert!(report.validation.misaligned_mappings.is_empty());
}

#[test]
fn test_itemized_report_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_mall(dir.path());
    write(dir.path(), "a/a.go", "package a\n\nconst OrderStatusCompleted = 7\n\nvar AllPayTypes = []int{0, 1, 2}\n");
    write(dir.path(), "b/b.go", "package b\n\nfunc f(x int) bool { return x == 3 || x == 5 }\n");

    let tool = standard_tool();
    let first = render_itemized(&tool.run_comprehensive_validation(dir.path()).unwrap());
    let second = render_itemized(&tool.run_comprehensive_validation(dir.path()).unwrap());

    assert_eq!(first, second);
    assert!(first.contains("OrderStatusCompleted defined 2 times"));
    assert!(first.contains("AllPayTypeValues"));
}

#[test]
fn test_generated_files_are_not_scanned() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_mall(dir.path());
    write(
        dir.path(),
        "api/order.pb.go",
        "package api\n\nconst OrderStatusClosed = 40\n",
    );
    write(
        dir.path(),
        "api/mock.go",
        "// Code generated by MockGen. DO NOT EDIT.\n\npackage api\n\nconst PayTypeAlipay = 9\n",
    );

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    assert!(report.overall_passed, "{}", render_itemized(&report));
    assert_eq!(report.statistics.constants_found, 26);
}

#[test]
fn test_iota_constants_never_align() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "status_constants.go",
        "package consts\n\nconst (\n\t// 待付款 @see OrderStatusEnum.PENDING_PAYMENT\n\tOrderStatusPendingPayment = iota\n)\n",
    );

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    let mapping = report
        .validation
        .misaligned_mappings
        .iter()
        .find(|m| m.constant_name == "OrderStatusPendingPayment")
        .unwrap();
    assert_eq!(mapping.actual, ObservedValue::Unparsed("iota".to_string()));
    assert_eq!(report.statistics.unparsed_constants, 1);
    assert!(report.validation.warnings[0].contains("non-literal value (iota)"));
}

#[test]
fn test_parse_failure_becomes_stage_error() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_mall(dir.path());
    write(dir.path(), "broken/broken.go", "package broken\n\nconst (\n\tA =\n");

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    assert!(!report.overall_passed);
    assert_eq!(report.stage_errors.len(), 1);
    assert_eq!(report.stage_errors[0].file.as_deref(), Some("broken/broken.go"));
    assert_eq!(report.statistics.files_failed, 1);
    assert_eq!(report.statistics.constants_found, 26);
    assert!(report.validation.organization_errors.is_empty());

    let itemized = render_itemized(&report);
    assert_eq!(itemized.matches("broken/broken.go").count(), 1);
}

#[test]
fn test_tree_without_constants_reports_every_mapping_missing() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "internal/order/service.go",
        "package order\n\nfunc f(x int) bool { return x > 10 }\n",
    );

    let report = standard_tool().run_comprehensive_validation(dir.path()).unwrap();

    assert!(!report.overall_passed);
    assert_eq!(report.statistics.files_scanned, 1);
    assert_eq!(report.statistics.constants_found, 0);
    let misaligned = &report.validation.misaligned_mappings;
    assert_eq!(misaligned.len(), 26);
    assert!(misaligned.iter().all(|m| m.actual == ObservedValue::Missing));
    assert!(render_itemized(&report).contains("-1 (missing)"));
}

#[test]
fn test_single_file_rejects_non_go_source() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "StatusActive = 2\n");

    let err = standard_tool()
        .validate_specific_file(&dir.path().join("notes.txt"))
        .unwrap_err();

    assert!(matches!(
        err,
        ValidationError::Parse(ParseError::UnsupportedLanguage { .. })
    ));
    assert_eq!(err.error_code(), "UNSUPPORTED_LANGUAGE");
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = standard_tool()
        .run_comprehensive_validation(&dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, ValidationError::Scan(ScanError::RootNotFound { .. })));
}

#[test]
fn test_cancelled_run() {
    let dir = tempfile::tempdir().unwrap();
    write_clean_mall(dir.path());
    let token = CancellationToken::new();
    token.cancel();

    let err = standard_tool()
        .with_cancellation(token)
        .run_comprehensive_validation(dir.path())
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::Cancelled | ValidationError::Scan(ScanError::Cancelled)
    ));
}
