//! Method descriptors
//!
//! A `MethodDescriptor` is the immutable binding metadata of one host
//! function: the names it answers to, its argument counts, arity checking
//! policy, declared visibility, scope and compatibility tag. Descriptors are
//! assembled once at host-type registration time, either by hand through
//! `MethodDescriptor::builder`, by the `#[method]` attribute, or from a
//! binding manifest.

use std::fmt;
use std::str::FromStr;

use garnet_core::CompatTag;

use crate::adapter::{AdapterShape, HostFunction};
use crate::arity::CheckArity;
use crate::error::DescriptorError;

/// Visibility as declared on a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeclaredVisibility {
    /// Not declared; defaulted by name when bound
    #[default]
    Unset,
    /// `public`
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// `module_function`: private instance copy, public singleton copy
    ModuleFunction,
}

impl DeclaredVisibility {
    /// Name used in binding manifests and the `#[method]` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredVisibility::Unset => "unset",
            DeclaredVisibility::Public => "public",
            DeclaredVisibility::Private => "private",
            DeclaredVisibility::Protected => "protected",
            DeclaredVisibility::ModuleFunction => "module_function",
        }
    }
}

impl fmt::Display for DeclaredVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclaredVisibility {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(DeclaredVisibility::Unset),
            "public" => Ok(DeclaredVisibility::Public),
            "private" => Ok(DeclaredVisibility::Private),
            "protected" => Ok(DeclaredVisibility::Protected),
            "module_function" => Ok(DeclaredVisibility::ModuleFunction),
            other => Err(DescriptorError::UnknownVisibility(other.to_string())),
        }
    }
}

/// Immutable binding metadata for one host function
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    name: String,
    aliases: Vec<String>,
    required: usize,
    optional: usize,
    rest: bool,
    check_arity: CheckArity,
    visibility: DeclaredVisibility,
    module: bool,
    meta: bool,
    compat: Option<CompatTag>,
    host: HostFunction,
}

impl MethodDescriptor {
    /// Start building a descriptor for `name`
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder::new(name)
    }

    /// Primary name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Additional names
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary name followed by the aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Mandatory positional arguments
    pub fn required(&self) -> usize {
        self.required
    }

    /// Additional accepted positional arguments
    pub fn optional(&self) -> usize {
        self.optional
    }

    /// Whether an unbounded trailing sequence is accepted
    pub fn rest(&self) -> bool {
        self.rest
    }

    /// Declared arity checking flag
    pub fn check_arity(&self) -> CheckArity {
        self.check_arity
    }

    /// Declared visibility
    pub fn visibility(&self) -> DeclaredVisibility {
        self.visibility
    }

    /// Installed on both the instance and the singleton table
    pub fn is_module_method(&self) -> bool {
        self.module || self.visibility == DeclaredVisibility::ModuleFunction
    }

    /// Installed on the singleton table only
    pub fn is_meta(&self) -> bool {
        self.meta
    }

    /// Compatibility tag, `None` for all versions
    pub fn compat(&self) -> Option<&CompatTag> {
        self.compat.as_ref()
    }

    /// The host function
    pub fn host(&self) -> HostFunction {
        self.host
    }

    /// Adapter shape of the host function
    pub fn shape(&self) -> AdapterShape {
        self.host.shape()
    }
}

/// Builder for `MethodDescriptor`. Validation happens in `build`.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: String,
    aliases: Vec<String>,
    required: i64,
    optional: i64,
    rest: bool,
    check_arity: CheckArity,
    visibility: DeclaredVisibility,
    module: bool,
    meta: bool,
    compat: Option<CompatTag>,
    host: Option<HostFunction>,
}

impl DescriptorBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            required: 0,
            optional: 0,
            rest: false,
            check_arity: CheckArity::Default,
            visibility: DeclaredVisibility::Unset,
            module: false,
            meta: false,
            compat: None,
            host: None,
        }
    }

    /// Mandatory positional argument count
    pub fn required(mut self, count: i64) -> Self {
        self.required = count;
        self
    }

    /// Optional positional argument count
    pub fn optional(mut self, count: i64) -> Self {
        self.optional = count;
        self
    }

    /// Accept an unbounded trailing sequence
    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }

    /// Explicitly enable or disable arity checking
    pub fn check_arity(mut self, enabled: bool) -> Self {
        self.check_arity = CheckArity::from(enabled);
        self
    }

    /// Declared visibility
    pub fn visibility(mut self, visibility: DeclaredVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Shorthand for `visibility(DeclaredVisibility::ModuleFunction)`
    pub fn module_function(self) -> Self {
        self.visibility(DeclaredVisibility::ModuleFunction)
    }

    /// Install on both the instance and the singleton table
    pub fn module(mut self) -> Self {
        self.module = true;
        self
    }

    /// Install on the singleton table only
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Restrict to one compatibility tag
    pub fn compat(mut self, tag: impl Into<CompatTag>) -> Self {
        self.compat = Some(tag.into());
        self
    }

    /// Additional name sharing the same entry
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    /// Host function to bind
    pub fn host(mut self, host: HostFunction) -> Self {
        self.host = Some(host);
        self
    }

    /// Validate and build the descriptor
    pub fn build(self) -> Result<MethodDescriptor, DescriptorError> {
        if self.name.is_empty() || self.aliases.iter().any(String::is_empty) {
            return Err(DescriptorError::EmptyName);
        }
        for (i, alias) in self.aliases.iter().enumerate() {
            if *alias == self.name || self.aliases[..i].contains(alias) {
                return Err(DescriptorError::DuplicateAlias {
                    name: self.name.clone(),
                    alias: alias.clone(),
                });
            }
        }
        let required = count(&self.name, "required", self.required)?;
        let optional = count(&self.name, "optional", self.optional)?;

        let host = self.host.ok_or_else(|| DescriptorError::MissingHost {
            name: self.name.clone(),
        })?;
        let shape = host.shape();
        shape
            .check_counts(required, optional, self.rest)
            .map_err(|reason| DescriptorError::ShapeMismatch {
                name: self.name.clone(),
                shape,
                reason,
            })?;
        // A fixed adapter that skipped the check would have to pad or drop slots
        if matches!(shape.fixed_slots(), Some(n) if n > 0) && !self.check_arity.resolve() {
            return Err(DescriptorError::UncheckedFixedArity {
                name: self.name,
                shape,
            });
        }
        if self.meta && (self.module || self.visibility == DeclaredVisibility::ModuleFunction) {
            return Err(DescriptorError::ConflictingScope { name: self.name });
        }

        Ok(MethodDescriptor {
            name: self.name,
            aliases: self.aliases,
            required,
            optional,
            rest: self.rest,
            check_arity: self.check_arity,
            visibility: self.visibility,
            module: self.module,
            meta: self.meta,
            compat: self.compat,
            host,
        })
    }
}

fn count(name: &str, field: &'static str, value: i64) -> Result<usize, DescriptorError> {
    if value < 0 {
        return Err(DescriptorError::NegativeCount {
            name: name.to_string(),
            field,
            value,
        });
    }
    usize::try_from(value).map_err(|_| DescriptorError::CountTooLarge {
        name: name.to_string(),
        field,
        value,
    })
}
