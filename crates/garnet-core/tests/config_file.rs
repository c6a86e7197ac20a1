//! Integration tests for loading runtime configuration from disk

use std::io::Write;

use garnet_core::{ConfigError, Runtime, RuntimeConfig};

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"compat = "1.9""#).unwrap();
    writeln!(file, r#"construction_hooks = ["initialize", "post_init"]"#).unwrap();

    let config = RuntimeConfig::from_file(file.path()).unwrap();
    let runtime = Runtime::with_config(config);

    assert_eq!(runtime.compat().as_str(), "1.9");
    assert!(runtime.is_construction_hook("post_init"));
    assert!(!runtime.is_construction_hook("initialize_copy"));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = RuntimeConfig::from_file(dir.path().join("garnet.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_empty_config_file_uses_defaults() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = RuntimeConfig::from_file(file.path()).unwrap();
    assert_eq!(config, RuntimeConfig::default());
}
