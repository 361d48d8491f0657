use std::fs;

use citegraph::config::*;
use citegraph::errors::CiteGraphError;
use citegraph::resolution::FallbackPolicy;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = CiteGraphConfig::default();
    assert!(!config.keep_text);
    assert!(config.parallel);
    assert!(!config.sort_output);
    assert_eq!(config.fallback, FallbackPolicy::FirstBelow);
    assert!(config.include.iter().any(|p| p == "**/*.json"));
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    let config = CiteGraphConfig {
        keep_text: true,
        fallback: FallbackPolicy::GreatestBelow,
        ..CiteGraphConfig::default()
    };
    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(config, loaded);
}

#[test]
fn test_missing_config_is_default() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(&dir.path().join(CONFIG_FILENAME)).unwrap();
    assert_eq!(loaded, CiteGraphConfig::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(&path, "keep_text = true\nfallback = \"greatest_below\"\n").unwrap();
    let loaded = load_config(&path).unwrap();
    assert!(loaded.keep_text);
    assert_eq!(loaded.fallback, FallbackPolicy::GreatestBelow);
    assert!(loaded.parallel);
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    fs::write(&path, "fallback = \"nearest\"\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, CiteGraphError::Config { .. }));
}

#[test]
fn test_should_include_file() {
    let config = CiteGraphConfig::default();
    assert!(should_include_file("cases.json", &config));
    assert!(should_include_file("volumes/001.json", &config));
    assert!(!should_include_file("volumes/readme.md", &config));
}

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper/out.json");
    write_atomic(&path, b"[]").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    assert!(!path.with_extension("tmp").exists());
}
