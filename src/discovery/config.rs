//! Generator configuration (scriptgen.yaml) parsing.
//!
//! Every field is optional; an absent file or an empty file yields the
//! baseline layout: headers under `./src`, output at
//! `./src/generated/generated_registrations.h`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Generator configuration loaded from scriptgen.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the header tree. Include paths are made relative to it.
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Generated header destination.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// File extensions (without dot) treated as headers.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Patterns to exclude from discovery.
    #[serde(default)]
    pub excludes: Vec<String>,

    /// Include guard macro of the generated header.
    #[serde(default = "default_guard")]
    pub guard: String,
}

fn default_source() -> PathBuf {
    PathBuf::from("./src")
}

fn default_output() -> PathBuf {
    PathBuf::from("./src/generated/generated_registrations.h")
}

fn default_extensions() -> Vec<String> {
    vec!["h".to_string(), "hpp".to_string()]
}

fn default_guard() -> String {
    "GENERATED_REGISTRATIONS_H".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            extensions: default_extensions(),
            excludes: vec![],
            guard: default_guard(),
        }
    }
}

impl Config {
    /// Load configuration from a scriptgen.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GenError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| GenError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check scriptgen.yaml syntax".to_string()),
        })?;

        if config.extensions.is_empty() {
            return Err(GenError::Config {
                message: "`extensions` must name at least one header extension".to_string(),
                help: Some("Remove the key to use the defaults (h, hpp)".to_string()),
            });
        }

        if !is_identifier(&config.guard) {
            return Err(GenError::Config {
                message: format!("`{}` is not a valid include guard", config.guard),
                help: Some("Use a C identifier such as GENERATED_REGISTRATIONS_H".to_string()),
            });
        }

        Ok(config)
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");

        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Whether the file has one of the configured header extensions.
    pub fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
            }
            return path.ends_with(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
