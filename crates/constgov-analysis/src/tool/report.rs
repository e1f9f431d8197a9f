//! Report rendering and persistence.
//!
//! Rendering is deterministic: no timestamps, every list already sorted by
//! the stage that produced it.

use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use constgov_core::errors::ReportError;
use serde::Serialize;

use super::types::{ComprehensiveValidationReport, FileValidationReport};
use crate::validators::DuplicateKind;

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

/// Terse summary: verdict plus one line per stage.
pub fn render_summary(report: &ComprehensiveValidationReport) -> String {
    let s = &report.statistics;
    let mut out = String::new();
    let _ = writeln!(out, "Constant governance validation: {}", verdict(report.overall_passed));
    let _ = writeln!(out, "  files scanned:        {} ({} failed)", s.files_scanned, s.files_failed);
    let _ = writeln!(
        out,
        "  constants:            {} ({} unparsed)",
        s.constants_found, s.unparsed_constants
    );
    let _ = writeln!(
        out,
        "  reference alignment:  {} aligned, {} misaligned",
        s.aligned_constants, s.misaligned_constants
    );
    let _ = writeln!(out, "  naming violations:    {}", s.naming_violations);
    let _ = writeln!(out, "  duplicates:           {}", s.duplicates);
    let _ = writeln!(out, "  organization errors:  {}", report.validation.organization_errors.len());
    let _ = writeln!(out, "  magic numbers:        {} (warnings)", s.magic_numbers);
    let _ = writeln!(
        out,
        "  documentation:        {} documented, {} undocumented, {} incomplete ({})",
        s.documented_constants,
        s.undocumented_constants,
        s.documentation_issues,
        if report.documentation.passed() { "ok" } else { "advisory" }
    );
    out
}

/// Full report: the summary followed by one section per finding category.
pub fn render_itemized(report: &ComprehensiveValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Root: {}", report.root);
    out.push_str(&render_summary(report));

    section(&mut out, "Reference alignment", &report.validation.misaligned_mappings, |m| {
        let location = match (&m.file, m.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            _ => "not defined".to_string(),
        };
        format!(
            "{} ({}): expected {}, actual {} [{}]",
            m.constant_name, m.reference_enum, m.expected, m.actual, location
        )
    });
    section(&mut out, "Naming violations", &report.naming_violations, |v| {
        format!(
            "{}:{} [{}] {}: expected {}, actual {}",
            v.file, v.line, v.violation_type, v.identifier, v.expected, v.actual
        )
    });
    section(&mut out, "Duplicates", &report.duplicates, |d| {
        let mut line = match d.kind {
            DuplicateKind::NameRedefinition => {
                format!("{} defined {} times", d.name, d.occurrences)
            }
            DuplicateKind::ValueCollision => format!(
                "value {} shared by {}",
                d.value.map(|v| v.to_string()).unwrap_or_default(),
                d.name
            ),
        };
        if !d.conflicting_values.is_empty() {
            let _ = write!(line, " with values {}", d.conflicting_values.join(", "));
        }
        let _ = write!(line, " in {}", d.defining_files.join(", "));
        line
    });
    section(
        &mut out,
        "Organization errors",
        &report.validation.organization_errors,
        |e| e.clone(),
    );
    section(&mut out, "Stage errors", &report.stage_errors, |e| e.to_string());
    section(&mut out, "Magic numbers (warnings)", &report.validation.magic_numbers, |l| {
        format!("{} value {}: {}", l.position(), l.value, l.context)
    });
    section(&mut out, "Warnings", &report.validation.warnings, |w| w.clone());

    let incomplete: Vec<_> = report.documentation.incomplete().collect();
    section(&mut out, "Documentation (advisory)", &incomplete, |v| {
        format!(
            "{}:{} {}: {}",
            v.file,
            v.line,
            v.constant_name,
            v.missing_elements.join(", ")
        )
    });
    out
}

/// Report for single-file mode.
pub fn render_file_report(report: &FileValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File validation {}: {}", report.file, verdict(report.passed));
    let _ = writeln!(out, "  naming violations:    {}", report.naming_violations.len());
    let _ = writeln!(out, "  magic numbers:        {} (warnings)", report.magic_numbers.len());
    section(&mut out, "Naming violations", &report.naming_violations, |v| {
        format!(
            "{}:{} [{}] {}: {}",
            v.file, v.line, v.violation_type, v.identifier, v.description
        )
    });
    section(&mut out, "Magic numbers (warnings)", &report.magic_numbers, |l| {
        format!("{} value {}: {}", l.position(), l.value, l.context)
    });
    out
}

fn section<T>(out: &mut String, title: &str, items: &[T], render: impl Fn(&T) -> String) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title} ({}):", items.len());
    for item in items {
        let _ = writeln!(out, "  - {}", render(item));
    }
}

/// Pretty JSON for any report type.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialize {
        message: e.to_string(),
    })
}

/// Write a report, creating parent directories as needed.
pub fn save_report(path: &Path, content: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    {
        let file = fs::File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    }
    tracing::info!(path = %path.display(), bytes = content.len(), "report saved");
    Ok(())
}
