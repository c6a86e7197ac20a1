//! Visibility defaulting and installation targets
//!
//! Decides the effective visibility of a bound name and which tables receive
//! a row. Module methods fan out to the module's own table and its singleton
//! class; the singleton row records the singleton class as its owner. Targets
//! name a scope rather than a module id, so planning never creates a
//! singleton class.

use garnet_core::{Runtime, Visibility};

use crate::descriptor::{DeclaredVisibility, MethodDescriptor};

/// Which table of the bind target receives a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScope {
    /// The target module's own table
    Module,
    /// The target's singleton class
    Singleton,
}

/// One row to install: the receiving table and the row's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallTarget {
    /// Receiving table, which is also the recorded owner
    pub scope: TargetScope,
    /// Effective visibility of this row
    pub visibility: Visibility,
}

/// Effective visibility for a single-table row.
///
/// Unset visibility is private for construction hooks and public otherwise.
/// `ModuleFunction` resolves to the visibility of its instance copy.
pub fn effective_visibility(declared: DeclaredVisibility, name: &str, runtime: &Runtime) -> Visibility {
    match declared {
        DeclaredVisibility::Public => Visibility::Public,
        DeclaredVisibility::Private | DeclaredVisibility::ModuleFunction => Visibility::Private,
        DeclaredVisibility::Protected => Visibility::Protected,
        DeclaredVisibility::Unset if runtime.is_construction_hook(name) => Visibility::Private,
        DeclaredVisibility::Unset => Visibility::Public,
    }
}

/// Rows to install for `name` of `descriptor`.
pub fn install_targets(
    runtime: &Runtime,
    descriptor: &MethodDescriptor,
    name: &str,
) -> Vec<InstallTarget> {
    let declared = descriptor.visibility();
    let visibility = effective_visibility(declared, name, runtime);

    if descriptor.is_meta() {
        return vec![InstallTarget {
            scope: TargetScope::Singleton,
            visibility,
        }];
    }

    let instance = InstallTarget {
        scope: TargetScope::Module,
        visibility,
    };
    if !descriptor.is_module_method() {
        return vec![instance];
    }

    let singleton_visibility = match declared {
        DeclaredVisibility::ModuleFunction => Visibility::Public,
        _ => visibility,
    };
    vec![
        instance,
        InstallTarget {
            scope: TargetScope::Singleton,
            visibility: singleton_visibility,
        },
    ]
}
