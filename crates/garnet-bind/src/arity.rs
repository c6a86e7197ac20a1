//! Arity policy resolution
//!
//! Turns a descriptor's counts and tri-state check flag into the bounds an
//! invoker enforces. Pure computation: counts are validated when the
//! descriptor is built.

use garnet_core::Arity;

/// Tri-state arity checking flag as declared on a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckArity {
    /// Not declared; checking is on
    #[default]
    Default,
    /// Explicitly enabled
    Enabled,
    /// Explicitly disabled (the only opt-out)
    Disabled,
}

impl CheckArity {
    /// Effective flag
    pub fn resolve(self) -> bool {
        match self {
            CheckArity::Default | CheckArity::Enabled => true,
            CheckArity::Disabled => false,
        }
    }
}

impl From<bool> for CheckArity {
    fn from(enabled: bool) -> Self {
        if enabled {
            CheckArity::Enabled
        } else {
            CheckArity::Disabled
        }
    }
}

/// Resolved call-time bounds and check flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArityPolicy {
    /// Enforced bounds
    pub arity: Arity,
    /// Whether the invoker checks them
    pub check_arity: bool,
}

/// Compute `(min, max, check)` from declared counts.
pub fn resolve(required: usize, optional: usize, rest: bool, check: CheckArity) -> ArityPolicy {
    let arity = if rest {
        Arity::at_least(required)
    } else {
        Arity::range(required, required + optional)
    };
    ArityPolicy {
        arity,
        check_arity: check.resolve(),
    }
}
