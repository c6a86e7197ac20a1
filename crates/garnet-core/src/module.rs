//! Modules, classes and singleton classes

use once_cell::sync::OnceCell;

use crate::method_table::MethodTable;

/// Module ID (index into the runtime module registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    /// Create a module ID from a registry index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registry index
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What kind of method container a module is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// A plain module (mixin / namespace)
    Module,
    /// A class, optionally with a superclass
    Class {
        /// Parent class (None for root classes)
        superclass: Option<ModuleId>,
    },
    /// The per-object class holding methods defined on one specific object
    Singleton {
        /// The module this singleton class belongs to
        attached: ModuleId,
    },
}

/// Module or class definition
#[derive(Debug)]
pub struct RModule {
    name: String,
    kind: ModuleKind,
    methods: MethodTable,
    /// Singleton class, created on first request
    singleton: OnceCell<ModuleId>,
}

impl RModule {
    pub(crate) fn new(name: String, kind: ModuleKind) -> Self {
        Self {
            name,
            kind,
            methods: MethodTable::new(),
            singleton: OnceCell::new(),
        }
    }

    /// Module name (`#<Class:Name>` for singleton classes)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this is a class (singleton classes count as classes)
    pub fn is_class(&self) -> bool {
        !matches!(self.kind, ModuleKind::Module)
    }

    /// Check if this is a singleton class
    pub fn is_singleton(&self) -> bool {
        matches!(self.kind, ModuleKind::Singleton { .. })
    }

    /// Superclass for classes
    pub fn superclass(&self) -> Option<ModuleId> {
        match self.kind {
            ModuleKind::Class { superclass } => superclass,
            _ => None,
        }
    }

    /// The object a singleton class is attached to
    pub fn attached(&self) -> Option<ModuleId> {
        match self.kind {
            ModuleKind::Singleton { attached } => Some(attached),
            _ => None,
        }
    }

    /// This module's own method table
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// Singleton class ID if one has been created
    pub fn singleton_id(&self) -> Option<ModuleId> {
        self.singleton.get().copied()
    }

    pub(crate) fn singleton_cell(&self) -> &OnceCell<ModuleId> {
        &self.singleton
    }
}
