//! Binding manifests (bindings.toml)
//!
//! A manifest lists method metadata as data, so bindings can be generated by
//! a build step instead of written with the attribute macro. Host functions
//! are looked up by symbol in a `HostFunctionRegistry`.
//!
//! ```toml
//! host_type = "Wombat"
//!
//! [[method]]
//! name = "four_arg_method"
//! symbol = "wombat_four"
//! shape = "args"
//! required = 4
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapter::{AdapterShape, HostFunction};
use crate::descriptor::{DeclaredVisibility, MethodDescriptor};
use crate::error::DescriptorError;

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read the manifest file
    #[error("failed to read binding manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("failed to parse binding manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// An entry does not describe a valid method
    #[error("invalid binding manifest: {0}")]
    Descriptor(#[from] DescriptorError),
}

// ============================================================================
// Host function registry
// ============================================================================

/// Host functions addressable by symbol
#[derive(Debug, Clone, Default)]
pub struct HostFunctionRegistry {
    functions: FxHashMap<String, HostFunction>,
}

impl HostFunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host function under `symbol`, replacing any previous one
    pub fn register(&mut self, symbol: impl Into<String>, function: HostFunction) {
        self.functions.insert(symbol.into(), function);
    }

    /// Look up a host function
    pub fn get(&self, symbol: &str) -> Option<HostFunction> {
        self.functions.get(symbol).copied()
    }

    /// Whether `symbol` is registered
    pub fn contains(&self, symbol: &str) -> bool {
        self.functions.contains_key(symbol)
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

// ============================================================================
// Manifest format
// ============================================================================

/// Binding manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingManifest {
    /// Host type name used in diagnostics
    #[serde(default)]
    pub host_type: String,

    /// Method entries
    #[serde(rename = "method", default)]
    pub methods: Vec<ManifestMethod>,
}

/// One `[[method]]` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestMethod {
    /// Primary name
    pub name: String,

    /// Registry symbol of the host function
    pub symbol: String,

    /// Expected adapter shape; checked against the registered function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,

    /// Required argument count
    #[serde(default)]
    pub required: i64,

    /// Optional argument count
    #[serde(default)]
    pub optional: i64,

    /// Accepts any number of trailing arguments
    #[serde(default)]
    pub rest: bool,

    /// Arity checking; omitted means the default (on)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_arity: Option<bool>,

    /// Declared visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    /// Also install on the singleton class
    #[serde(default)]
    pub module: bool,

    /// Install on the singleton class only
    #[serde(default)]
    pub meta: bool,

    /// Compatibility tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compat: Option<String>,

    /// Additional names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl BindingManifest {
    /// Load a manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a manifest from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Build descriptors, resolving symbols against `registry`
    pub fn descriptors(&self, registry: &HostFunctionRegistry) -> Result<Vec<MethodDescriptor>, DescriptorError> {
        self.methods.iter().map(|method| method.descriptor(registry)).collect()
    }
}

impl ManifestMethod {
    /// Build the descriptor for this entry
    pub fn descriptor(&self, registry: &HostFunctionRegistry) -> Result<MethodDescriptor, DescriptorError> {
        let host = registry
            .get(&self.symbol)
            .ok_or_else(|| DescriptorError::UnknownSymbol(self.symbol.clone()))?;

        if let Some(declared) = &self.shape {
            let declared: AdapterShape = declared.parse()?;
            if declared != host.shape() {
                return Err(DescriptorError::ShapeMismatch {
                    name: self.name.clone(),
                    shape: host.shape(),
                    reason: format!("does not match declared shape {}", declared),
                });
            }
        }

        let mut builder = MethodDescriptor::builder(self.name.clone())
            .required(self.required)
            .optional(self.optional)
            .host(host);
        if self.rest {
            builder = builder.rest();
        }
        if let Some(enabled) = self.check_arity {
            builder = builder.check_arity(enabled);
        }
        if let Some(visibility) = &self.visibility {
            builder = builder.visibility(visibility.parse::<DeclaredVisibility>()?);
        }
        if self.module {
            builder = builder.module();
        }
        if self.meta {
            builder = builder.meta();
        }
        if let Some(tag) = &self.compat {
            builder = builder.compat(tag.as_str());
        }
        for alias in &self.aliases {
            builder = builder.alias(alias.clone());
        }
        builder.build()
    }
}
