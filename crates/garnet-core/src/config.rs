//! Runtime configuration (`garnet.toml`)
//!
//! ```toml
//! compat = "1.9"
//! construction_hooks = ["initialize", "initialize_copy"]
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a runtime configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Compatibility tag naming a runtime language version (e.g. `"1.9"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompatTag(String);

impl CompatTag {
    /// Create a tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Tag text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompatTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CompatTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Active compatibility tag (default: "2.0")
    #[serde(default = "default_compat")]
    pub compat: CompatTag,

    /// Object-construction hooks, private unless a binding says otherwise
    #[serde(default = "default_construction_hooks")]
    pub construction_hooks: Vec<String>,
}

fn default_compat() -> CompatTag {
    CompatTag::new("2.0")
}

fn default_construction_hooks() -> Vec<String> {
    [
        "initialize",
        "initialize_copy",
        "initialize_clone",
        "initialize_dup",
        "respond_to_missing?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            compat: default_compat(),
            construction_hooks: default_construction_hooks(),
        }
    }
}

impl RuntimeConfig {
    /// Default configuration with a different active compat tag
    pub fn with_compat(compat: impl Into<CompatTag>) -> Self {
        Self {
            compat: compat.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compat.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("compat tag must not be empty".to_string()));
        }
        if self.construction_hooks.iter().any(|h| h.is_empty()) {
            return Err(ConfigError::Invalid(
                "construction hook names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check if `name` is a construction hook
    pub fn is_construction_hook(&self, name: &str) -> bool {
        self.construction_hooks.iter().any(|h| h == name)
    }
}
