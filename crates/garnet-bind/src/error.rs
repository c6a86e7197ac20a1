//! Binding-time error types

use garnet_core::{CompatTag, ModuleId};
use thiserror::Error;

use crate::adapter::AdapterShape;

/// Malformed method metadata, detected while building descriptors or while
/// filtering them for a binding pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Descriptor (or alias) name is empty
    #[error("method name must not be empty")]
    EmptyName,

    /// Argument count below zero
    #[error("method '{name}': {field} must not be negative (got {value})")]
    NegativeCount {
        /// Method name
        name: String,
        /// Which count ("required" or "optional")
        field: &'static str,
        /// Offending value
        value: i64,
    },

    /// Argument count does not fit the platform's address width
    #[error("method '{name}': {field} is too large (got {value})")]
    CountTooLarge {
        /// Method name
        name: String,
        /// Which count ("required" or "optional")
        field: &'static str,
        /// Offending value
        value: i64,
    },

    /// An alias repeats the primary name or another alias
    #[error("method '{name}': alias '{alias}' is declared more than once")]
    DuplicateAlias {
        /// Method name
        name: String,
        /// Repeated alias
        alias: String,
    },

    /// No host function attached
    #[error("method '{name}': no host function")]
    MissingHost {
        /// Method name
        name: String,
    },

    /// Adapter shape name not recognised
    #[error("unknown adapter shape '{0}'")]
    UnknownShape(String),

    /// Visibility name not recognised
    #[error("unknown visibility '{0}'")]
    UnknownVisibility(String),

    /// Host symbol not present in the registry
    #[error("unknown host function symbol '{0}'")]
    UnknownSymbol(String),

    /// Host function signature cannot represent the declared arity
    #[error("method '{name}': {shape} adapter {reason}")]
    ShapeMismatch {
        /// Method name
        name: String,
        /// Shape of the host function
        shape: AdapterShape,
        /// What disagrees
        reason: String,
    },

    /// Fixed-arity adapters cannot opt out of arity checking
    #[error("method '{name}': {shape} adapter requires arity checking")]
    UncheckedFixedArity {
        /// Method name
        name: String,
        /// Shape of the host function
        shape: AdapterShape,
    },

    /// Both singleton-only and module scope requested
    #[error("method '{name}': meta methods cannot also be module methods")]
    ConflictingScope {
        /// Method name
        name: String,
    },

    /// Two descriptors declare the same name under the same tag
    #[error("duplicate method '{name}' for {}", tag_label(.compat))]
    DuplicateName {
        /// Method name
        name: String,
        /// Shared tag
        compat: Option<CompatTag>,
    },

    /// An untagged and a tagged descriptor both apply under the active tag
    #[error("method '{name}' is declared both untagged and for compat {compat}")]
    AmbiguousName {
        /// Method name
        name: String,
        /// Active tag
        compat: CompatTag,
    },
}

fn tag_label(compat: &Option<CompatTag>) -> String {
    match compat {
        Some(tag) => format!("compat {}", tag),
        None => "all versions".to_string(),
    }
}

impl DescriptorError {
    /// Name of the descriptor the error refers to, when known
    pub fn descriptor_name(&self) -> Option<&str> {
        match self {
            DescriptorError::NegativeCount { name, .. }
            | DescriptorError::CountTooLarge { name, .. }
            | DescriptorError::DuplicateAlias { name, .. }
            | DescriptorError::MissingHost { name }
            | DescriptorError::ShapeMismatch { name, .. }
            | DescriptorError::UncheckedFixedArity { name, .. }
            | DescriptorError::ConflictingScope { name }
            | DescriptorError::DuplicateName { name, .. }
            | DescriptorError::AmbiguousName { name, .. } => Some(name),
            DescriptorError::EmptyName
            | DescriptorError::UnknownShape(_)
            | DescriptorError::UnknownVisibility(_)
            | DescriptorError::UnknownSymbol(_) => None,
        }
    }
}

/// A binding pass failed; nothing from the pass was installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// A descriptor was rejected
    #[error("cannot bind {host_type}#{descriptor}: {source}")]
    Descriptor {
        /// Host type being bound
        host_type: String,
        /// Offending descriptor name (`?` when the descriptor has none yet)
        descriptor: String,
        /// Why
        #[source]
        source: DescriptorError,
    },

    /// Target module is not registered with the runtime
    #[error("cannot bind {host_type}: unknown target module #{}", .module.index())]
    UnknownModule {
        /// Host type being bound
        host_type: String,
        /// Requested target
        module: ModuleId,
    },
}

impl BindError {
    pub(crate) fn descriptor(host_type: &str, source: DescriptorError) -> Self {
        BindError::Descriptor {
            host_type: host_type.to_string(),
            descriptor: source.descriptor_name().unwrap_or("?").to_string(),
            source,
        }
    }

    pub(crate) fn unknown_module(host_type: &str, module: ModuleId) -> Self {
        BindError::UnknownModule {
            host_type: host_type.to_string(),
            module,
        }
    }

    /// The underlying descriptor error, if any
    pub fn descriptor_error(&self) -> Option<&DescriptorError> {
        match self {
            BindError::Descriptor { source, .. } => Some(source),
            BindError::UnknownModule { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_message() {
        let tagged = DescriptorError::DuplicateName {
            name: "method".to_string(),
            compat: Some(CompatTag::new("1.9")),
        };
        assert_eq!(tagged.to_string(), "duplicate method 'method' for compat 1.9");

        let untagged = DescriptorError::DuplicateName { name: "method".to_string(), compat: None };
        assert_eq!(untagged.to_string(), "duplicate method 'method' for all versions");
    }

    #[test]
    fn test_bind_error_carries_descriptor_name() {
        let err = BindError::descriptor(
            "Wombat",
            DescriptorError::MissingHost { name: "foo".to_string() },
        );
        assert_eq!(err.to_string(), "cannot bind Wombat#foo: method 'foo': no host function");
        assert!(matches!(err.descriptor_error(), Some(DescriptorError::MissingHost { .. })));

        let err = BindError::descriptor("Wombat", DescriptorError::EmptyName);
        assert!(err.to_string().starts_with("cannot bind Wombat#?"));
    }

    #[test]
    fn test_unknown_module_names_host_type() {
        let err = BindError::unknown_module("Wombat", ModuleId::new(7));
        assert_eq!(err.to_string(), "cannot bind Wombat: unknown target module #7");
        assert!(err.descriptor_error().is_none());
    }

    #[test]
    fn test_count_messages() {
        let negative = DescriptorError::NegativeCount {
            name: "foo".to_string(),
            field: "required",
            value: -1,
        };
        assert_eq!(negative.to_string(), "method 'foo': required must not be negative (got -1)");

        let large = DescriptorError::CountTooLarge {
            name: "foo".to_string(),
            field: "optional",
            value: i64::MAX,
        };
        assert_eq!(
            large.to_string(),
            format!("method 'foo': optional is too large (got {})", i64::MAX)
        );
        assert_eq!(large.descriptor_name(), Some("foo"));
    }
}
