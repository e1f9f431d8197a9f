//! Top-level constgov configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DocumentationConfig, ReportConfig, ScanConfig};
use crate::errors::ConfigError;

/// Project config file looked up in the scan root.
pub const PROJECT_CONFIG_FILE: &str = "constgov.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CONSTGOV_*`)
/// 3. Project config (`constgov.toml` in the root, or an explicit file)
/// 4. Compiled defaults
///
/// Rule tables (categories, reference mapping) are not configurable here;
/// changing them is a code change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConstgovConfig {
    pub scan: ScanConfig,
    pub documentation: DocumentationConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<String>,
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl ConstgovConfig {
    /// Load configuration with layered resolution.
    ///
    /// `explicit` replaces the project file lookup; unlike the implicit
    /// `constgov.toml`, it must exist.
    pub fn load(
        root: &Path,
        explicit: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ConstgovConfig) -> Result<(), ConfigError> {
        if let Some(max_file_size) = config.scan.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ref suffix) = config.scan.constants_suffix {
            if suffix.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.constants_suffix".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.documentation.min_comment_chars == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "documentation.min_comment_chars".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ConstgovConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ConstgovConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "merged config file");
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut ConstgovConfig, other: &ConstgovConfig) {
        // Scan
        if other.scan.constants_suffix.is_some() {
            base.scan.constants_suffix = other.scan.constants_suffix.clone();
        }
        if !other.scan.excluded_suffixes.is_empty() {
            base.scan.excluded_suffixes = other.scan.excluded_suffixes.clone();
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.skip_generated.is_some() {
            base.scan.skip_generated = other.scan.skip_generated;
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }

        // Documentation
        if other.documentation.min_comment_chars.is_some() {
            base.documentation.min_comment_chars = other.documentation.min_comment_chars;
        }
        if !other.documentation.citation_markers.is_empty() {
            base.documentation.citation_markers = other.documentation.citation_markers.clone();
        }

        // Report
        if other.report.output.is_some() {
            base.report.output = other.report.output.clone();
        }
        if other.report.verbose.is_some() {
            base.report.verbose = other.report.verbose;
        }
        if other.report.json.is_some() {
            base.report.json = other.report.json;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CONSTGOV_CONSTANTS_SUFFIX`, `CONSTGOV_MAX_FILE_SIZE`, etc.
    fn apply_env_overrides(config: &mut ConstgovConfig) {
        if let Ok(val) = std::env::var("CONSTGOV_CONSTANTS_SUFFIX") {
            config.scan.constants_suffix = Some(val);
        }
        if let Ok(val) = std::env::var("CONSTGOV_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CONSTGOV_SKIP_GENERATED") {
            if let Ok(v) = val.parse::<bool>() {
                config.scan.skip_generated = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CONSTGOV_MIN_COMMENT_CHARS") {
            if let Ok(v) = val.parse::<usize>() {
                config.documentation.min_comment_chars = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CONSTGOV_REPORT_OUTPUT") {
            config.report.output = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ConstgovConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.output {
            config.report.output = Some(v.clone());
        }
        if let Some(v) = cli.verbose {
            config.report.verbose = Some(v);
        }
        if let Some(v) = cli.json {
            config.report.json = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
