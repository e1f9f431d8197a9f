//! Aggregate result types.

use serde::{Deserialize, Serialize};

use crate::parsers::NumericLiteral;
use crate::validators::{DocumentationReport, DuplicateConstant, MisalignedMapping, NamingViolation};

/// Core pass/fail result: alignment plus organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Warnings only.
    pub magic_numbers: Vec<NumericLiteral>,
    pub misaligned_mappings: Vec<MisalignedMapping>,
    /// Placement violations, one line each.
    pub organization_errors: Vec<String>,
    pub warnings: Vec<String>,
    pub passed: bool,
}

/// Counters over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub constants_found: usize,
    pub unparsed_constants: usize,
    pub aligned_constants: usize,
    pub misaligned_constants: usize,
    pub magic_numbers: usize,
    pub naming_violations: usize,
    pub duplicates: usize,
    pub documented_constants: usize,
    pub undocumented_constants: usize,
    pub documentation_issues: usize,
}

/// A stage that could not process part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageError {
    pub stage: String,
    pub file: Option<String>,
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "[{}] {} {}: {}", self.code, self.stage, file, self.message),
            None => write!(f, "[{}] {}: {}", self.code, self.stage, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensiveValidationReport {
    pub root: String,
    pub validation: ValidationResult,
    pub naming_violations: Vec<NamingViolation>,
    pub duplicates: Vec<DuplicateConstant>,
    /// Advisory; see `DocumentationReport::passed`.
    pub documentation: DocumentationReport,
    pub statistics: Statistics,
    pub stage_errors: Vec<StageError>,
    pub overall_passed: bool,
    pub summary: String,
}

impl ComprehensiveValidationReport {
    /// Pass iff no misalignment, naming violation, duplicate, organization
    /// error or stage error was found.
    pub fn compute_passed(&self) -> bool {
        self.validation.misaligned_mappings.is_empty()
            && self.validation.organization_errors.is_empty()
            && self.naming_violations.is_empty()
            && self.duplicates.is_empty()
            && self.stage_errors.is_empty()
    }
}

/// Result of validating one file in isolation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValidationReport {
    pub file: String,
    pub magic_numbers: Vec<NumericLiteral>,
    pub naming_violations: Vec<NamingViolation>,
    pub passed: bool,
}
