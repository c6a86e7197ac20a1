//! Runtime: module registry, singleton-class facility and configuration

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{CompatTag, RuntimeConfig};
use crate::context::CallContext;
use crate::method::MethodEntry;
use crate::module::{ModuleId, ModuleKind, RModule};

/// Runtime instance owning every module and class.
///
/// Modules are stored in a registry indexed by `ModuleId`; a module is never
/// removed once defined.
#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    modules: RwLock<Vec<Arc<RModule>>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Create a runtime with the default configuration
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Create a runtime with an explicit configuration
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            modules: RwLock::new(Vec::new()),
        }
    }

    /// Runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Active compatibility tag
    pub fn compat(&self) -> &CompatTag {
        &self.config.compat
    }

    /// Check if `name` is an object-construction hook
    pub fn is_construction_hook(&self, name: &str) -> bool {
        self.config.is_construction_hook(name)
    }

    /// Context for calls made on the current thread
    pub fn current_context(&self) -> CallContext<'_> {
        CallContext::new(self)
    }

    // ========================================================================
    // Module registry
    // ========================================================================

    fn register(&self, name: String, kind: ModuleKind) -> ModuleId {
        let mut modules = self.modules.write();
        let id = ModuleId::new(modules.len());
        modules.push(Arc::new(RModule::new(name, kind)));
        id
    }

    /// Define a new module
    pub fn define_module(&self, name: impl Into<String>) -> ModuleId {
        self.register(name.into(), ModuleKind::Module)
    }

    /// Define a new class
    pub fn define_class(&self, name: impl Into<String>, superclass: Option<ModuleId>) -> ModuleId {
        self.register(name.into(), ModuleKind::Class { superclass })
    }

    /// Get a module by ID
    pub fn module(&self, id: ModuleId) -> Option<Arc<RModule>> {
        self.modules.read().get(id.index()).cloned()
    }

    /// Find a module by name (singleton classes are not searchable)
    pub fn module_by_name(&self, name: &str) -> Option<Arc<RModule>> {
        self.modules
            .read()
            .iter()
            .find(|m| !m.is_singleton() && m.name() == name)
            .cloned()
    }

    /// Singleton class of a module, created on first request.
    ///
    /// Repeated calls return the same ID.
    pub fn singleton_of(&self, id: ModuleId) -> Option<ModuleId> {
        let module = self.module(id)?;
        let singleton = *module.singleton_cell().get_or_init(|| {
            let name = format!("#<Class:{}>", module.name());
            self.register(name, ModuleKind::Singleton { attached: id })
        });
        Some(singleton)
    }

    /// Look up a method on a module, then along its superclass chain
    pub fn search_method(&self, id: ModuleId, name: &str) -> Option<Arc<MethodEntry>> {
        let mut current = Some(id);
        while let Some(module_id) = current {
            let module = self.module(module_id)?;
            if let Some(entry) = module.methods().lookup(name) {
                return Some(entry);
            }
            current = module.superclass();
        }
        None
    }
}
