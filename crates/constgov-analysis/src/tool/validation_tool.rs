//! The validation orchestrator.

use std::path::Path;

use constgov_core::config::ConstgovConfig;
use constgov_core::errors::ValidationError;
use constgov_core::traits::{Cancellable, CancellationToken};

use super::report::render_summary;
use super::types::{
    ComprehensiveValidationReport, FileValidationReport, StageError, Statistics, ValidationResult,
};
use crate::parsers::{ConstantDefinition, DeclarationExtractor, GoExtractor};
use crate::rules::RuleSet;
use crate::scanner::{display_path, extract_file, ScanOutcome, Scanner};
use crate::validators::{
    AlignmentReport, AlignmentValidator, DocumentationValidator, DuplicateDetector, MagicNumberDetector,
    NamingValidator,
};

/// Runs every stage over a root and aggregates the findings.
/// Holds no state between runs.
pub struct ValidationTool {
    config: ConstgovConfig,
    rules: RuleSet,
    extractor: Box<dyn DeclarationExtractor>,
    cancellation: CancellationToken,
}

impl ValidationTool {
    pub fn new(config: ConstgovConfig, rules: RuleSet) -> Self {
        Self {
            config,
            rules,
            extractor: Box::new(GoExtractor::new()),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn DeclarationExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &ConstgovConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Scan `root` and run every validator.
    ///
    /// Fails only when the root is unusable or the run is cancelled; per-file
    /// problems are reported as stage errors.
    pub fn run_comprehensive_validation(
        &self,
        root: &Path,
    ) -> Result<ComprehensiveValidationReport, ValidationError> {
        tracing::info!(root = %root.display(), "starting comprehensive validation");
        let suffix = self.config.scan.effective_constants_suffix();

        let outcome = Scanner::new(root, &self.config.scan)
            .with_cancellation(self.cancellation.clone())
            .scan(self.extractor.as_ref())?;
        let constants: Vec<&ConstantDefinition> =
            outcome.files.iter().flat_map(|f| f.constants.iter()).collect();

        self.checkpoint()?;
        let magic_numbers = MagicNumberDetector::from_rules(&self.rules, suffix).detect(&outcome.files);
        tracing::info!(count = magic_numbers.len(), "magic number detection complete");

        self.checkpoint()?;
        let alignment = if outcome.files.is_empty() {
            AlignmentReport::default()
        } else {
            AlignmentValidator::new(&self.rules.reference).validate(&constants)
        };
        tracing::info!(
            aligned = alignment.aligned.len(),
            misaligned = alignment.misaligned.len(),
            "reference alignment complete"
        );

        self.checkpoint()?;
        let naming_violations =
            NamingValidator::new(&self.rules.categories, &self.rules.naming).validate(&outcome.files);
        tracing::info!(count = naming_violations.len(), "naming validation complete");

        self.checkpoint()?;
        let duplicates =
            DuplicateDetector::new(&self.rules.categories, &self.rules.reasonable_duplicate_values)
                .detect(&constants);
        tracing::info!(count = duplicates.len(), "duplicate detection complete");

        self.checkpoint()?;
        let documentation = DocumentationValidator::new(
            &self.rules.categories,
            &self.rules.reference,
            suffix,
            self.config.documentation.effective_min_comment_chars(),
            self.config.documentation.effective_citation_markers(),
        )
        .validate(&outcome.files);
        tracing::info!(
            checked = documentation.validations.len(),
            incomplete = documentation.incomplete().count(),
            "documentation validation complete"
        );

        let stage_errors = stage_errors(&outcome);
        let organization_errors: Vec<String> = naming_violations
            .iter()
            .filter(|v| v.is_placement())
            .map(|v| format!("{}:{} {}", v.file, v.line, v.description))
            .collect();

        let statistics = Statistics {
            files_scanned: outcome.stats.files_parsed,
            files_failed: outcome.stats.files_failed,
            constants_found: constants.len(),
            unparsed_constants: outcome.stats.unparsed_constants,
            aligned_constants: alignment.aligned.len(),
            misaligned_constants: alignment.misaligned.len(),
            magic_numbers: magic_numbers.len(),
            naming_violations: naming_violations.len(),
            duplicates: duplicates.len(),
            documented_constants: documentation.documented(),
            undocumented_constants: documentation.undocumented(),
            documentation_issues: documentation.incomplete().count(),
        };

        let passed = alignment.misaligned.is_empty() && organization_errors.is_empty();
        let mut report = ComprehensiveValidationReport {
            root: outcome.root.clone(),
            validation: ValidationResult {
                magic_numbers,
                misaligned_mappings: alignment.misaligned,
                organization_errors,
                warnings: outcome.warnings.clone(),
                passed,
            },
            naming_violations,
            duplicates,
            documentation,
            statistics,
            stage_errors,
            overall_passed: false,
            summary: String::new(),
        };
        report.overall_passed = report.compute_passed();
        report.summary = render_summary(&report);

        tracing::info!(passed = report.overall_passed, "comprehensive validation finished");
        Ok(report)
    }

    /// Magic-number and naming checks on a single file, independent of any corpus.
    pub fn validate_specific_file(&self, path: &Path) -> Result<FileValidationReport, ValidationError> {
        tracing::info!(file = %path.display(), "validating single file");
        let display = display_path(path);
        let facts = extract_file(path, &display, self.extractor.as_ref())?;

        let magic_numbers =
            MagicNumberDetector::from_rules(&self.rules, self.config.scan.effective_constants_suffix())
                .detect_file(&facts);
        let naming_violations =
            NamingValidator::new(&self.rules.categories, &self.rules.naming).validate_file(&facts);

        Ok(FileValidationReport {
            file: display,
            passed: naming_violations.is_empty(),
            magic_numbers,
            naming_violations,
        })
    }

    fn checkpoint(&self) -> Result<(), ValidationError> {
        if self.cancellation.is_cancelled() {
            return Err(ValidationError::Cancelled);
        }
        Ok(())
    }
}

fn stage_errors(outcome: &ScanOutcome) -> Vec<StageError> {
    outcome
        .failures
        .iter()
        .map(|f| StageError {
            stage: "scan".to_string(),
            file: Some(f.file.clone()),
            code: f.code.clone(),
            message: f.message.clone(),
        })
        .collect()
}
