//! Binder: installs a host type's descriptors into a module
//!
//! A binding pass runs these stages in order:
//!
//! ```text
//! COLLECT -> FILTER_VERSIONS -> RESOLVE_ARITY -> SYNTHESIZE_ADAPTER
//!         -> RESOLVE_VISIBILITY_OWNERSHIP -> INSTALL
//! ```
//!
//! Everything up to INSTALL only builds values. Each descriptor yields one
//! base row; alias, visibility and owner variants are siblings of it sharing
//! its invoker. INSTALL creates the target's singleton class when a row needs
//! it and writes every table after all selected names have resolved, so a
//! failing pass leaves the runtime as it was.

use std::sync::Arc;

use garnet_core::{MethodEntry, ModuleId, Runtime, Visibility};
use rustc_hash::FxHashMap;

use crate::adapter::synthesize;
use crate::arity;
use crate::descriptor::MethodDescriptor;
use crate::error::{BindError, DescriptorError};
use crate::ownership::{install_targets, TargetScope};
use crate::version;

/// A host type exposing annotated methods
pub trait HostType {
    /// Name used in diagnostics
    const NAME: &'static str;

    /// All method descriptors of this type
    fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError>;
}

/// Result of a binding pass
pub type BindingResult = Result<Vec<BoundMethod>, BindError>;

/// One bound name and the rows installed for it
#[derive(Debug, Clone)]
pub struct BoundMethod {
    name: String,
    instance: Option<Arc<MethodEntry>>,
    singleton: Option<Arc<MethodEntry>>,
}

impl BoundMethod {
    /// Bound name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row in the target module's own table
    pub fn instance(&self) -> Option<&Arc<MethodEntry>> {
        self.instance.as_ref()
    }

    /// Row in the target's singleton class
    pub fn singleton(&self) -> Option<&Arc<MethodEntry>> {
        self.singleton.as_ref()
    }

    /// The instance row if present, else the singleton row
    pub fn entry(&self) -> Option<&Arc<MethodEntry>> {
        self.instance.as_ref().or(self.singleton.as_ref())
    }
}

/// A resolved row waiting for the INSTALL stage
struct PlannedRow {
    /// Index into `Plan::names`
    method: usize,
    entry: MethodEntry,
}

/// Output of every stage before INSTALL
struct Plan {
    names: Vec<String>,
    instance: Vec<PlannedRow>,
    singleton: Vec<PlannedRow>,
}

/// Binds descriptors into a runtime's modules
#[derive(Debug, Clone, Copy)]
pub struct Binder<'rt> {
    runtime: &'rt Runtime,
}

impl<'rt> Binder<'rt> {
    /// Create a binder for a runtime
    pub fn new(runtime: &'rt Runtime) -> Self {
        Self { runtime }
    }

    /// Bind every descriptor of `T` into `target`
    pub fn bind<T: HostType>(&self, target: ModuleId) -> BindingResult {
        let descriptors = T::descriptors().map_err(|e| {
            tracing::warn!(host_type = T::NAME, error = %e, "descriptor collection failed");
            BindError::descriptor(T::NAME, e)
        })?;
        self.bind_descriptors(T::NAME, &descriptors, target)
    }

    /// Bind an explicit descriptor list into `target`
    pub fn bind_descriptors(
        &self,
        host_type: &str,
        descriptors: &[MethodDescriptor],
        target: ModuleId,
    ) -> BindingResult {
        let _span = tracing::debug_span!("bind", host_type, target = target.index()).entered();

        let result = self
            .plan(host_type, descriptors, target)
            .and_then(|plan| self.install(host_type, target, plan));
        match result {
            Ok(bound) => {
                tracing::debug!(count = bound.len(), "binding pass complete");
                Ok(bound)
            }
            Err(e) => {
                tracing::warn!(error = %e, "binding pass aborted, nothing installed");
                Err(e)
            }
        }
    }

    /// Every stage before INSTALL
    fn plan(
        &self,
        host_type: &str,
        descriptors: &[MethodDescriptor],
        target: ModuleId,
    ) -> Result<Plan, BindError> {
        // COLLECT
        if self.runtime.module(target).is_none() {
            return Err(BindError::unknown_module(host_type, target));
        }

        // FILTER_VERSIONS
        let selected = version::select(descriptors, self.runtime.compat())
            .map_err(|e| BindError::descriptor(host_type, e))?;

        // RESOLVE_ARITY + SYNTHESIZE_ADAPTER, once per descriptor
        let mut bases: FxHashMap<usize, MethodEntry> = FxHashMap::default();

        let mut plan = Plan {
            names: Vec::with_capacity(selected.len()),
            instance: Vec::new(),
            singleton: Vec::new(),
        };
        for selection in selected {
            let descriptor = &descriptors[selection.index];
            let base = bases.entry(selection.index).or_insert_with(|| {
                let policy = arity::resolve(
                    descriptor.required(),
                    descriptor.optional(),
                    descriptor.rest(),
                    descriptor.check_arity(),
                );
                MethodEntry::new(
                    descriptor.name(),
                    target,
                    Visibility::Public,
                    policy.arity,
                    policy.check_arity,
                    synthesize(descriptor.host(), policy),
                )
            });
            let named = base.with_name(selection.name);

            // RESOLVE_VISIBILITY_OWNERSHIP
            let method = plan.names.len();
            for install in install_targets(self.runtime, descriptor, selection.name) {
                let row = PlannedRow {
                    method,
                    entry: named.with_visibility(install.visibility),
                };
                match install.scope {
                    TargetScope::Module => plan.instance.push(row),
                    TargetScope::Singleton => plan.singleton.push(row),
                }
            }
            plan.names.push(selection.name.to_string());
        }
        Ok(plan)
    }

    /// INSTALL: resolve tables, then write one batch per table
    fn install(&self, host_type: &str, target: ModuleId, plan: Plan) -> BindingResult {
        let unknown = || BindError::unknown_module(host_type, target);

        let mut tables = Vec::with_capacity(2);
        let module = self.runtime.module(target).ok_or_else(unknown)?;
        tables.push((target, module, TargetScope::Module, plan.instance));
        if !plan.singleton.is_empty() {
            // Singleton classes are only created once the pass is known to succeed
            let singleton = self.runtime.singleton_of(target).ok_or_else(unknown)?;
            let module = self.runtime.module(singleton).ok_or_else(unknown)?;
            tables.push((singleton, module, TargetScope::Singleton, plan.singleton));
        }

        let mut bound: Vec<BoundMethod> = plan
            .names
            .into_iter()
            .map(|name| BoundMethod {
                name,
                instance: None,
                singleton: None,
            })
            .collect();
        for (owner, module, scope, rows) in tables {
            let mut items = Vec::with_capacity(rows.len());
            for row in rows {
                let entry = Arc::new(row.entry.with_owner(owner));
                tracing::debug!(
                    name = entry.name(),
                    owner = owner.index(),
                    visibility = %entry.visibility(),
                    min = entry.min_args(),
                    max = ?entry.max_args(),
                    check_arity = entry.check_arity_enabled(),
                    "installing method"
                );
                let slot = &mut bound[row.method];
                match scope {
                    TargetScope::Module => slot.instance = Some(entry.clone()),
                    TargetScope::Singleton => slot.singleton = Some(entry.clone()),
                }
                items.push((entry.name().to_string(), entry));
            }
            module.methods().install_batch(items);
        }
        Ok(bound)
    }
}

/// `Runtime` extension for binding host types
pub trait DefineMethods {
    /// Bind every descriptor of `T` into `target`
    fn define_annotated_methods<T: HostType>(&self, target: ModuleId) -> BindingResult;
}

impl DefineMethods for Runtime {
    fn define_annotated_methods<T: HostType>(&self, target: ModuleId) -> BindingResult {
        Binder::new(self).bind::<T>(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::HostFunction;
    use garnet_core::{CallContext, HostResult, RuntimeConfig, Value};

    fn recv_only(recv: &Value) -> HostResult {
        Ok(Some(recv.clone()))
    }

    fn count_args(_ctx: &CallContext<'_>, _recv: &Value, args: &[Value]) -> HostResult {
        Ok(Some(Value::Integer(args.len() as i64)))
    }

    struct Counter;

    impl HostType for Counter {
        const NAME: &'static str = "Counter";

        fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError> {
            Ok(vec![
                MethodDescriptor::builder("count")
                    .optional(2)
                    .alias("size")
                    .host(HostFunction::ContextArgs(count_args))
                    .build()?,
                MethodDescriptor::builder("itself")
                    .module()
                    .host(HostFunction::Receiver(recv_only))
                    .build()?,
            ])
        }
    }

    #[test]
    fn test_bind_host_type() {
        let runtime = Runtime::new();
        let m = runtime.define_module("Counter");

        let bound = runtime.define_annotated_methods::<Counter>(m).unwrap();
        let names: Vec<&str> = bound.iter().map(BoundMethod::name).collect();
        assert_eq!(names, vec!["count", "size", "itself"]);

        let module = runtime.module(m).unwrap();
        assert_eq!(module.methods().names(), vec!["count", "itself", "size"]);

        let count = module.methods().lookup("count").unwrap();
        let size = module.methods().lookup("size").unwrap();
        assert!(count.shares_invoker_with(&size));
        assert_eq!(count.max_args(), Some(2));
    }

    #[test]
    fn test_module_method_rows() {
        let runtime = Runtime::new();
        let m = runtime.define_module("Counter");
        let bound = Binder::new(&runtime).bind::<Counter>(m).unwrap();

        let itself = bound.iter().find(|b| b.name() == "itself").unwrap();
        let instance = itself.instance().unwrap();
        let singleton = itself.singleton().unwrap();
        assert_eq!(instance.owner(), m);
        assert_eq!(singleton.owner(), runtime.singleton_of(m).unwrap());
        assert!(instance.shares_invoker_with(singleton));
        assert_eq!(instance.visibility(), Visibility::Public);
        assert_eq!(instance.arity(), singleton.arity());
        assert_eq!(instance.min_args(), singleton.min_args());
        assert_eq!(instance.max_args(), singleton.max_args());
    }

    #[test]
    fn test_alias_rows_derive_from_one_base() {
        let runtime = Runtime::new();
        let m = runtime.define_module("Counter");
        let bound = Binder::new(&runtime).bind::<Counter>(m).unwrap();

        let count = bound[0].instance().unwrap();
        let size = bound[1].instance().unwrap();
        assert_eq!(count.name(), "count");
        assert_eq!(size.name(), "size");
        assert_eq!(size.owner(), m);
        assert_eq!(size.arity(), count.arity());
        assert_eq!(size.check_arity_enabled(), count.check_arity_enabled());
        assert!(size.shares_invoker_with(count));
        assert!(bound[0].singleton().is_none());
    }

    #[test]
    fn test_failed_pass_installs_nothing() {
        let runtime = Runtime::with_config(RuntimeConfig::with_compat("1.9"));
        let m = runtime.define_module("Broken");
        let descriptors = vec![
            MethodDescriptor::builder("ok").host(HostFunction::Receiver(recv_only)).build().unwrap(),
            MethodDescriptor::builder("clash").host(HostFunction::Receiver(recv_only)).build().unwrap(),
            MethodDescriptor::builder("clash")
                .compat("1.9")
                .host(HostFunction::Receiver(recv_only))
                .build()
                .unwrap(),
        ];

        let err = Binder::new(&runtime).bind_descriptors("Broken", &descriptors, m).unwrap_err();
        assert!(matches!(
            err.descriptor_error(),
            Some(DescriptorError::AmbiguousName { .. })
        ));
        assert!(runtime.module(m).unwrap().methods().is_empty());
    }

    #[test]
    fn test_failed_pass_creates_no_singleton() {
        let runtime = Runtime::new();
        let m = runtime.define_module("Broken");
        let descriptors = vec![
            MethodDescriptor::builder("shared")
                .module()
                .host(HostFunction::Receiver(recv_only))
                .build()
                .unwrap(),
            MethodDescriptor::builder("factory")
                .meta()
                .host(HostFunction::Receiver(recv_only))
                .build()
                .unwrap(),
            MethodDescriptor::builder("factory")
                .meta()
                .host(HostFunction::Receiver(recv_only))
                .build()
                .unwrap(),
        ];

        let err = Binder::new(&runtime).bind_descriptors("Broken", &descriptors, m).unwrap_err();
        assert!(matches!(
            err.descriptor_error(),
            Some(DescriptorError::DuplicateName { .. })
        ));
        assert!(runtime.module(m).unwrap().singleton_id().is_none());
        assert!(runtime.module_by_name("#<Class:Broken>").is_none());

        // A successful pass creates it at INSTALL
        Binder::new(&runtime).bind_descriptors("Fixed", &descriptors[..2], m).unwrap();
        let singleton = runtime.module(m).unwrap().singleton_id().unwrap();
        assert!(runtime.module(singleton).unwrap().methods().lookup("factory").is_some());
    }

    #[test]
    fn test_unknown_target_module() {
        let runtime = Runtime::new();
        let err = Binder::new(&runtime).bind::<Counter>(ModuleId::new(7)).unwrap_err();
        assert_eq!(
            err,
            BindError::UnknownModule { host_type: "Counter".to_string(), module: ModuleId::new(7) }
        );
        assert_eq!(err.to_string(), "cannot bind Counter: unknown target module #7");
    }
}
