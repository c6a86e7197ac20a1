//! Integration tests for binding `#[method]`-annotated host functions

use garnet_bind::garnet_core::{CallContext, Runtime, RuntimeConfig, RuntimeError, Value, Visibility};
use garnet_bind::{method, DefineMethods, DescriptorError, HostType, MethodDescriptor};

// ============================================================================
// Host types
// ============================================================================

#[method]
fn void_returning_method(_recv: &Value) {}

#[method(required = 4)]
fn four_arg_method(_recv: &Value, _args: &[Value]) -> Value {
    Value::Bool(true)
}

#[method(name = "optWithCheckArityTrue", required = 1, optional = 1, check_arity = true)]
fn opt_with_check_arity_true(ctx: &CallContext<'_>, _recv: &Value, _args: &[Value]) -> Value {
    ctx.tru()
}

#[method(name = "optWithCheckArityFalse", required = 1, optional = 1, check_arity = false)]
fn opt_with_check_arity_false(ctx: &CallContext<'_>, _recv: &Value, _args: &[Value]) -> Value {
    ctx.tru()
}

#[method(name = "optWithCheckArityDefault", required = 1, optional = 1)]
fn opt_with_check_arity_default(ctx: &CallContext<'_>, _recv: &Value, _args: &[Value]) -> Value {
    ctx.tru()
}

struct MyBoundClass;

impl HostType for MyBoundClass {
    const NAME: &'static str = "MyBoundClass";

    fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError> {
        Ok(vec![
            void_returning_method_descriptor()?,
            four_arg_method_descriptor()?,
            opt_with_check_arity_true_descriptor()?,
            opt_with_check_arity_false_descriptor()?,
            opt_with_check_arity_default_descriptor()?,
        ])
    }
}

#[method(module)]
fn a_module_method(recv: &Value) -> Value {
    recv.clone()
}

struct ModuleMethods;

impl HostType for ModuleMethods {
    const NAME: &'static str = "ModuleMethods";

    fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError> {
        Ok(vec![a_module_method_descriptor()?])
    }
}

#[method(name = "method", compat = "1.8")]
fn method18(_recv: &Value) -> Value {
    Value::string("1.8")
}

#[method(name = "method", compat = "1.9")]
fn method19(_recv: &Value) -> Value {
    Value::string("1.9")
}

struct VersionedMethods;

impl HostType for VersionedMethods {
    const NAME: &'static str = "VersionedMethods";

    fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError> {
        Ok(vec![method18_descriptor()?, method19_descriptor()?])
    }
}

#[method]
fn initialize(ctx: &CallContext<'_>, _recv: &Value) -> Value {
    ctx.nil()
}

#[method]
fn initialize_copy(ctx: &CallContext<'_>, _recv: &Value, _copy: &Value) -> Value {
    ctx.nil()
}

#[method]
fn some_other_method(ctx: &CallContext<'_>, _recv: &Value) -> Value {
    ctx.nil()
}

struct NoVisibilityInitialize;

impl HostType for NoVisibilityInitialize {
    const NAME: &'static str = "NoVisibilityInitialize";

    fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError> {
        Ok(vec![
            initialize_descriptor()?,
            initialize_copy_descriptor()?,
            some_other_method_descriptor()?,
        ])
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_void_and_four_arg_methods() {
    let runtime = Runtime::new();
    let module = runtime.define_module("Wombat");
    runtime.define_annotated_methods::<MyBoundClass>(module).unwrap();

    let ctx = runtime.current_context();
    let recv = Value::Module(module);

    let void = runtime.search_method(module, "void_returning_method").unwrap();
    assert_eq!(void.call(&ctx, &recv, &[], None).unwrap(), Value::Nil);

    let four = runtime.search_method(module, "four_arg_method").unwrap();
    assert_eq!(four.min_args(), 4);
    assert_eq!(four.max_args(), Some(4));
    let nils = vec![Value::Nil; 4];
    assert!(four.call(&ctx, &recv, &nils, None).unwrap().is_truthy());

    let err = four.call(&ctx, &recv, &nils[..3], None).unwrap_err();
    assert!(err.is_arity_error());
}

#[test]
fn test_check_arity_opt_out() {
    let runtime = Runtime::new();
    let module = runtime.define_module("Wombat");
    runtime.define_annotated_methods::<MyBoundClass>(module).unwrap();

    let ctx = runtime.current_context();
    let recv = Value::Module(module);
    let call = |name: &str| {
        runtime
            .search_method(module, name)
            .unwrap()
            .call(&ctx, &recv, &[], None)
    };

    let err = call("optWithCheckArityTrue").unwrap_err();
    assert!(matches!(err, RuntimeError::Arity(_)));
    assert_eq!(
        err.to_string(),
        "ArgumentError: wrong number of arguments (given 0, expected 1..2)"
    );

    assert_eq!(call("optWithCheckArityFalse").unwrap(), Value::Bool(true));

    assert!(call("optWithCheckArityDefault").unwrap_err().is_arity_error());
}

#[test]
fn test_module_method_owner() {
    let runtime = Runtime::new();
    let module = runtime.define_module("GH3463Module");
    runtime.define_annotated_methods::<ModuleMethods>(module).unwrap();

    let singleton = runtime.singleton_of(module).unwrap();
    let on_singleton = runtime.search_method(singleton, "a_module_method").unwrap();
    assert_eq!(on_singleton.owner(), singleton);

    let on_module = runtime.search_method(module, "a_module_method").unwrap();
    assert_eq!(on_module.owner(), module);
    assert!(on_module.shares_invoker_with(&on_singleton));
    assert_eq!(on_module.arity(), on_singleton.arity());
    assert_eq!(on_module.min_args(), on_singleton.min_args());
    assert_eq!(on_module.max_args(), on_singleton.max_args());
    assert_eq!(on_module.visibility(), on_singleton.visibility());
}

#[test]
fn test_versioned_methods() {
    let runtime = Runtime::with_config(RuntimeConfig::with_compat("1.9"));
    let module = runtime.define_module("GH1194");
    runtime.define_annotated_methods::<VersionedMethods>(module).unwrap();

    let ctx = runtime.current_context();
    let method = runtime.search_method(module, "method").unwrap();
    assert_eq!(method.call(&ctx, &Value::Nil, &[], None).unwrap(), Value::string("1.9"));

    // Neither variant applies under the default tag; binding still succeeds
    let runtime = Runtime::new();
    let module = runtime.define_module("GH1194");
    let bound = runtime.define_annotated_methods::<VersionedMethods>(module).unwrap();
    assert!(bound.is_empty());
    assert!(runtime.search_method(module, "method").is_none());
}

#[test]
fn test_default_visibility() {
    let runtime = Runtime::new();
    let class = runtime.define_class("NoVisibilityInitialize", None);
    runtime.define_annotated_methods::<NoVisibilityInitialize>(class).unwrap();

    let visibility = |name: &str| runtime.search_method(class, name).unwrap().visibility();
    assert_eq!(visibility("initialize"), Visibility::Private);
    assert_eq!(visibility("initialize_copy"), Visibility::Private);
    assert_eq!(visibility("some_other_method"), Visibility::Public);
}

#[test]
fn test_inherited_lookup() {
    let runtime = Runtime::new();
    let parent = runtime.define_class("Parent", None);
    let child = runtime.define_class("Child", Some(parent));
    runtime.define_annotated_methods::<NoVisibilityInitialize>(parent).unwrap();

    let found = runtime.search_method(child, "some_other_method").unwrap();
    assert_eq!(found.owner(), parent);
}
