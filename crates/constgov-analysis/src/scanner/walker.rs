//! Sequential file walker: discovery, eligibility filtering and extraction.

use std::fs;
use std::path::{Component, Path, PathBuf};

use constgov_core::config::ScanConfig;
use constgov_core::errors::{ConstgovErrorCode, ParseError, ScanError};
use constgov_core::traits::{Cancellable, CancellationToken};

use super::ignores::IgnorePatterns;
use super::types::{ScanFailure, ScanOutcome, ScanStats, SourceFile};
use crate::parsers::types::file_name_of;
use crate::parsers::{ConstantValue, DeclarationExtractor, FileFacts};

/// Header marker of machine-generated Go files.
const GENERATED_PREFIX: &str = "// Code generated ";
const GENERATED_SUFFIX: &str = "DO NOT EDIT.";

/// Source scanner rooted at one directory.
pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
    ignores: IgnorePatterns,
    cancellation: CancellationToken,
}

impl Scanner {
    pub fn new(root: &Path, config: &ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config.clone(),
            ignores: IgnorePatterns::new(root, &config.extra_ignore),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and extract facts from every eligible file.
    ///
    /// Only an unusable root or cancellation is fatal. Unreadable or
    /// unparseable files become `ScanFailure`s.
    pub fn scan(&self, extractor: &dyn DeclarationExtractor) -> Result<ScanOutcome, ScanError> {
        let mut stats = ScanStats::default();
        let mut warnings = Vec::new();
        let candidates = self.discover(extractor, &mut stats, &mut warnings)?;

        let mut files = Vec::with_capacity(candidates.len());
        let mut failures = Vec::new();
        let skip_generated = self.config.effective_skip_generated();

        for file in candidates {
            if self.cancellation.is_cancelled() {
                return Err(ScanError::Cancelled);
            }

            let source = match read_source(&file.path) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(file = %file.relative, error = %e, "unreadable source file");
                    failures.push(failure(&file.relative, &e));
                    continue;
                }
            };

            if skip_generated && is_generated(&source) {
                tracing::debug!(file = %file.relative, "generated file skipped");
                stats.files_generated += 1;
                continue;
            }

            match extractor.extract(&source, &file.path, &file.relative) {
                Ok(facts) => {
                    tracing::debug!(
                        file = %file.relative,
                        constants = facts.constants.len(),
                        literals = facts.literals.len(),
                        "file extracted"
                    );
                    for constant in facts.constants.iter().filter(|c| c.value.is_unparsed()) {
                        stats.unparsed_constants += 1;
                        warnings.push(format!(
                            "{}:{} {} has a non-literal value ({})",
                            constant.file,
                            constant.line,
                            constant.name,
                            unparsed_text(&constant.value)
                        ));
                    }
                    files.push(facts);
                }
                Err(e) => {
                    tracing::warn!(file = %file.relative, error = %e, "parse failure, file skipped");
                    failures.push(failure(&file.relative, &e));
                }
            }
        }

        stats.files_parsed = files.len();
        stats.files_failed = failures.len();
        tracing::info!(
            root = %self.root.display(),
            language = extractor.language(),
            discovered = stats.files_discovered,
            parsed = stats.files_parsed,
            failed = stats.files_failed,
            "scan complete"
        );

        Ok(ScanOutcome {
            root: self.root.display().to_string(),
            files,
            failures,
            warnings,
            stats,
        })
    }

    /// Eligible files under the root, sorted by relative path.
    fn discover(
        &self,
        extractor: &dyn DeclarationExtractor,
        stats: &mut ScanStats,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<SourceFile>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(ScanError::RootNotDirectory {
                path: self.root.clone(),
            });
        }
        let entries = fs::read_dir(&self.root).map_err(|e| ScanError::IoError {
            path: self.root.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        self.walk_entries(entries, extractor, &mut files, stats, warnings)?;
        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        stats.files_discovered = files.len();
        Ok(files)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        extractor: &dyn DeclarationExtractor,
        files: &mut Vec<SourceFile>,
        stats: &mut ScanStats,
        warnings: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        match fs::read_dir(dir) {
            Ok(entries) => self.walk_entries(entries, extractor, files, stats, warnings),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "unreadable directory skipped");
                warnings.push(format!("{}: directory not readable ({e})", self.relative(dir)));
                Ok(())
            }
        }
    }

    fn walk_entries(
        &self,
        entries: fs::ReadDir,
        extractor: &dyn DeclarationExtractor,
        files: &mut Vec<SourceFile>,
        stats: &mut ScanStats,
        warnings: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        let follow_symlinks = self.config.effective_follow_symlinks();
        let excluded = self.config.effective_excluded_suffixes();
        let max_size = self.config.effective_max_file_size();

        for entry in entries.flatten() {
            if self.cancellation.is_cancelled() {
                return Err(ScanError::Cancelled);
            }
            let path = entry.path();
            let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
            if is_symlink && !follow_symlinks {
                continue;
            }
            let relative_path = path.strip_prefix(&self.root).unwrap_or(&path);

            if path.is_dir() {
                if self.ignores.is_ignored(relative_path, true) {
                    stats.dirs_ignored += 1;
                    continue;
                }
                self.walk_dir(&path, extractor, files, stats, warnings)?;
                continue;
            }
            if !path.is_file()
                || !extractor.handles(&path)
                || self.ignores.is_ignored(relative_path, false)
            {
                continue;
            }

            let relative = self.relative(&path);
            if excluded.iter().any(|suffix| relative.ends_with(suffix.as_str())) {
                stats.files_excluded += 1;
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > max_size {
                tracing::debug!(file = %relative, size, "file exceeds max size, skipped");
                stats.files_too_large += 1;
                continue;
            }
            files.push(SourceFile {
                path,
                relative,
                size,
            });
        }
        Ok(())
    }

    /// Root-relative, `/`-separated display path.
    fn relative(&self, path: &Path) -> String {
        display_path(path.strip_prefix(&self.root).unwrap_or(path))
    }
}

/// Join path components with `/` regardless of platform.
pub fn display_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::RootDir => Some(String::new()),
            Component::CurDir => None,
            Component::ParentDir => Some("..".to_string()),
            Component::Prefix(p) => Some(p.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a file name carries the constants-file suffix.
pub fn is_constants_file(path: &str, suffix: &str) -> bool {
    file_name_of(path).ends_with(suffix)
}

/// Whether the source starts with the standard generated-code header.
/// Only lines before the package clause are inspected.
pub fn is_generated(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("package "))
        .any(|line| line.starts_with(GENERATED_PREFIX) && line.ends_with(GENERATED_SUFFIX))
}

/// Read a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String, ParseError> {
    fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and extract a single file outside a scan.
pub fn extract_file(
    path: &Path,
    display: &str,
    extractor: &dyn DeclarationExtractor,
) -> Result<FileFacts, ParseError> {
    if !extractor.handles(path) {
        return Err(ParseError::UnsupportedLanguage {
            path: path.to_path_buf(),
        });
    }
    let source = read_source(path)?;
    extractor.extract(&source, path, display)
}

fn failure(file: &str, error: &ParseError) -> ScanFailure {
    ScanFailure {
        file: file.to_string(),
        code: error.error_code().to_string(),
        message: error.to_string(),
    }
}

fn unparsed_text(value: &ConstantValue) -> &str {
    match value {
        ConstantValue::Unparsed(text) => text,
        ConstantValue::Int(_) => "",
    }
}
