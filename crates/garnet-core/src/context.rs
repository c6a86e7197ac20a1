//! Call context and blocks
//!
//! `CallContext` is the value context-carrying host functions receive. The
//! binder treats it as opaque and only passes it through.

use std::fmt;
use std::sync::Arc;

use crate::config::CompatTag;
use crate::error::RuntimeResult;
use crate::runtime::Runtime;
use crate::value::Value;

/// Per-call view of the runtime
#[derive(Clone, Copy)]
pub struct CallContext<'rt> {
    runtime: &'rt Runtime,
}

impl<'rt> CallContext<'rt> {
    /// Create a context for the given runtime
    pub fn new(runtime: &'rt Runtime) -> Self {
        Self { runtime }
    }

    /// The runtime this call executes in
    pub fn runtime(&self) -> &'rt Runtime {
        self.runtime
    }

    /// Active compatibility tag
    pub fn compat(&self) -> &'rt CompatTag {
        self.runtime.compat()
    }

    /// `nil`
    #[inline]
    pub fn nil(&self) -> Value {
        Value::Nil
    }

    /// `true`
    #[inline]
    pub fn tru(&self) -> Value {
        Value::Bool(true)
    }

    /// `false`
    #[inline]
    pub fn fals(&self) -> Value {
        Value::Bool(false)
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("compat", self.runtime.compat())
            .finish()
    }
}

type BlockFn = dyn for<'a> Fn(&CallContext<'a>, &[Value]) -> RuntimeResult<Value> + Send + Sync;

/// Block passed alongside a call
#[derive(Clone)]
pub struct Block {
    body: Arc<BlockFn>,
}

impl Block {
    /// Wrap a callable as a block
    pub fn new<F>(body: F) -> Self
    where
        F: for<'a> Fn(&CallContext<'a>, &[Value]) -> RuntimeResult<Value> + Send + Sync + 'static,
    {
        Self { body: Arc::new(body) }
    }

    /// Yield to the block
    pub fn call(&self, ctx: &CallContext<'_>, args: &[Value]) -> RuntimeResult<Value> {
        (self.body)(ctx, args)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Block")
    }
}
