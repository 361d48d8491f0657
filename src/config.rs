use std::fs;
use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::errors::{CiteGraphError, Result};
use crate::resolution::FallbackPolicy;

/// Default name of the configuration file looked up next to the corpus.
pub const CONFIG_FILENAME: &str = "citegraph.toml";

/// Configuration for a citation resolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiteGraphConfig {
    /// Whether the output artifact keeps each record's text segments.
    pub keep_text: bool,
    /// Fallback strategy used when a citation matches no record exactly.
    pub fallback: FallbackPolicy,
    /// Whether records are processed on the rayon thread pool.
    pub parallel: bool,
    /// Whether output records are emitted in canonical order instead of
    /// corpus order.
    pub sort_output: bool,
    /// Glob patterns for shard files when the corpus is a directory.
    pub include: Vec<String>,
}

impl Default for CiteGraphConfig {
    fn default() -> Self {
        Self {
            keep_text: false,
            fallback: FallbackPolicy::FirstBelow,
            parallel: true,
            sort_output: false,
            include: vec!["*.json".to_string(), "**/*.json".to_string()],
        }
    }
}

/// Loads the configuration from `path`.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(path: &Path) -> Result<CiteGraphConfig> {
    if !path.exists() {
        return Ok(CiteGraphConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| CiteGraphError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: CiteGraphConfig = toml::from_str(&contents).map_err(|e| CiteGraphError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })?;

    Ok(config)
}

/// Saves the configuration to `path` using an atomic write.
pub fn save_config(path: &Path, config: &CiteGraphConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).map_err(|e| CiteGraphError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;
    write_atomic(path, contents.as_bytes()).map_err(|e| CiteGraphError::Config {
        message: format!("failed to write config file '{}': {}", path.display(), e),
    })
}

/// Writes `contents` to a temporary sibling of `path` and renames it into
/// place, so a partial write never leaves a truncated file behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}

/// Whether a shard file under a corpus directory should be loaded.
///
/// `relative_path` is matched against the configuration's include patterns.
pub fn should_include_file(relative_path: &str, config: &CiteGraphConfig) -> bool {
    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    config.include.iter().any(|pattern_str| {
        Pattern::new(pattern_str)
            .map(|pattern| pattern.matches_with(relative_path, match_opts))
            .unwrap_or(false)
    })
}
