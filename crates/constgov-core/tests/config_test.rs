//! Tests for the constgov configuration system.

use std::sync::Mutex;

use constgov_core::config::{CliOverrides, ConstgovConfig, PROJECT_CONFIG_FILE};
use constgov_core::errors::{ConfigError, ConstgovErrorCode};

/// Serializes tests that touch `CONSTGOV_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_constgov_env_vars() {
    for key in [
        "CONSTGOV_CONSTANTS_SUFFIX",
        "CONSTGOV_MAX_FILE_SIZE",
        "CONSTGOV_SKIP_GENERATED",
        "CONSTGOV_MIN_COMMENT_CHARS",
        "CONSTGOV_REPORT_OUTPUT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_constgov_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(PROJECT_CONFIG_FILE),
        r#"
[scan]
constants_suffix = "_consts.go"
max_file_size = 4096

[report]
output = "from-file.txt"
"#,
    )
    .unwrap();

    std::env::set_var("CONSTGOV_MAX_FILE_SIZE", "8192");

    let cli = CliOverrides {
        output: Some("from-cli.txt".to_string()),
        ..Default::default()
    };
    let config = ConstgovConfig::load(dir.path(), None, Some(&cli)).unwrap();

    assert_eq!(config.scan.effective_constants_suffix(), "_consts.go");
    assert_eq!(config.scan.effective_max_file_size(), 8192);
    assert_eq!(config.report.output.as_deref(), Some("from-cli.txt"));

    clear_constgov_env_vars();
}

#[test]
fn test_defaults_without_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_constgov_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = ConstgovConfig::load(dir.path(), None, None).unwrap();

    assert_eq!(config.scan.effective_constants_suffix(), "_constants.go");
    assert!(config.scan.effective_skip_generated());
    assert!(config
        .scan
        .effective_excluded_suffixes()
        .contains(&"_test.go".to_string()));
    assert_eq!(config.documentation.effective_min_comment_chars(), 4);
    assert!(!config.report.effective_verbose());
}

#[test]
fn test_explicit_config_must_exist() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_constgov_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = ConstgovConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let result = ConstgovConfig::from_toml("[scan\nmax_file_size = ");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_rejects_zero_values() {
    let result = ConstgovConfig::from_toml("[scan]\nmax_file_size = 0\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { ref field, .. }) if field == "scan.max_file_size"));

    let result = ConstgovConfig::from_toml("[documentation]\nmin_comment_chars = 0\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));

    let result = ConstgovConfig::from_toml("[scan]\nconstants_suffix = \"  \"\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_toml_round_trip_keeps_overrides() {
    let config = ConstgovConfig::from_toml(
        "[documentation]\nmin_comment_chars = 6\ncitation_markers = [\"@ref\"]\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let reparsed = ConstgovConfig::from_toml(&text).unwrap();
    assert_eq!(reparsed.documentation.effective_min_comment_chars(), 6);
    assert_eq!(
        reparsed.documentation.effective_citation_markers(),
        vec!["@ref".to_string()]
    );
}
