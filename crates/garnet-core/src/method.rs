//! Installed method entries
//!
//! A `MethodEntry` is one row of a method table: the invoker plus the
//! metadata introspection needs (owner, visibility, arity bounds). Entries
//! are immutable once built; redefinition installs a new entry in place of
//! the old one.

use std::fmt;
use std::sync::Arc;

use crate::context::{Block, CallContext};
use crate::error::RuntimeResult;
use crate::module::ModuleId;
use crate::value::Value;

/// Result of a host function: `None` means the host returned no value.
pub type HostResult = RuntimeResult<Option<Value>>;

/// Callable adapter bound to an entry.
///
/// Receives the call context, the receiver, the positional arguments and an
/// optional block.
pub type Invoker = Arc<
    dyn for<'a> Fn(&CallContext<'a>, &Value, &[Value], Option<&Block>) -> HostResult
        + Send
        + Sync,
>;

/// Method visibility as installed in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Callable from anywhere
    Public,
    /// Callable only with an implicit receiver
    Private,
    /// Callable from instances of the same class family
    Protected,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        };
        f.write_str(s)
    }
}

/// Call-time argument bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arity {
    /// Minimum positional arguments
    pub min: usize,
    /// Maximum positional arguments (`None` = unbounded)
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` arguments
    pub const fn fixed(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// Between `min` and `max` arguments
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    /// At least `min` arguments
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Check whether `argc` falls inside the bounds
    #[inline]
    pub fn accepts(&self, argc: usize) -> bool {
        argc >= self.min && self.max.map_or(true, |max| argc <= max)
    }
}

/// One installed method row.
#[derive(Clone)]
pub struct MethodEntry {
    name: Arc<str>,
    owner: ModuleId,
    visibility: Visibility,
    arity: Arity,
    check_arity: bool,
    invoker: Invoker,
}

impl MethodEntry {
    /// Create a fully resolved entry
    pub fn new(
        name: impl Into<Arc<str>>,
        owner: ModuleId,
        visibility: Visibility,
        arity: Arity,
        check_arity: bool,
        invoker: Invoker,
    ) -> Self {
        Self {
            name: name.into(),
            owner,
            visibility,
            arity,
            check_arity,
            invoker,
        }
    }

    /// Sibling row with a different owner, sharing the invoker
    pub fn with_owner(&self, owner: ModuleId) -> Self {
        Self {
            owner,
            ..self.clone()
        }
    }

    /// Sibling row with a different visibility, sharing the invoker
    pub fn with_visibility(&self, visibility: Visibility) -> Self {
        Self {
            visibility,
            ..self.clone()
        }
    }

    /// Sibling row under another name, sharing the invoker
    pub fn with_name(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Name the entry was installed under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module recorded as the implementation holder
    pub fn owner(&self) -> ModuleId {
        self.owner
    }

    /// Effective visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Enforced argument bounds
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Minimum positional arguments
    pub fn min_args(&self) -> usize {
        self.arity.min
    }

    /// Maximum positional arguments (`None` = unbounded)
    pub fn max_args(&self) -> Option<usize> {
        self.arity.max
    }

    /// Whether the invoker checks argument counts
    pub fn check_arity_enabled(&self) -> bool {
        self.check_arity
    }

    /// Check if two rows call the same adapter
    pub fn shares_invoker_with(&self, other: &MethodEntry) -> bool {
        Arc::ptr_eq(&self.invoker, &other.invoker)
    }

    /// Call the method. A host "no value" comes back as `nil`.
    pub fn call(
        &self,
        ctx: &CallContext<'_>,
        recv: &Value,
        args: &[Value],
        block: Option<&Block>,
    ) -> RuntimeResult<Value> {
        let result = (self.invoker)(ctx, recv, args, block)?;
        Ok(result.unwrap_or(Value::Nil))
    }
}

impl fmt::Debug for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("visibility", &self.visibility)
            .field("arity", &self.arity)
            .field("check_arity", &self.check_arity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::fixed(2).accepts(2));
        assert!(!Arity::fixed(2).accepts(1));
        assert!(!Arity::fixed(2).accepts(3));

        let range = Arity::range(1, 2);
        assert!(!range.accepts(0));
        assert!(range.accepts(1));
        assert!(range.accepts(2));
        assert!(!range.accepts(3));

        assert!(Arity::at_least(1).accepts(100));
        assert!(!Arity::at_least(1).accepts(0));
    }

    #[test]
    fn test_sibling_rows_share_invoker() {
        let invoker: Invoker = Arc::new(
            |_ctx: &CallContext<'_>, recv: &Value, _args: &[Value], _block: Option<&Block>| {
                Ok(Some(recv.clone()))
            },
        );
        let entry = MethodEntry::new(
            "foo",
            ModuleId::new(1),
            Visibility::Public,
            Arity::fixed(0),
            true,
            invoker,
        );
        let copy = entry.with_owner(ModuleId::new(2));

        assert_eq!(copy.owner(), ModuleId::new(2));
        assert_eq!(entry.owner(), ModuleId::new(1));
        assert_eq!(copy.arity(), entry.arity());
        assert!(copy.shares_invoker_with(&entry));
    }
}
