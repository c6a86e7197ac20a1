//! Garnet core - object model collaborators for native method binding
//!
//! This crate provides what the binder installs into and what host functions
//! receive:
//! - `Value`, the dynamically typed value
//! - `Runtime`, the module registry with the singleton-class facility
//! - `MethodTable` and `MethodEntry`, the installed method rows
//! - `CallContext` and `Block`, threaded through context-carrying adapters
//! - `ArityError` / `RuntimeError`, raised through invokers
//! - `RuntimeConfig`, the active compatibility tag and construction hooks

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod method;
pub mod method_table;
pub mod module;
pub mod runtime;
pub mod value;

pub use config::{CompatTag, ConfigError, RuntimeConfig};
pub use context::{Block, CallContext};
pub use convert::{FromValue, IntoHostResult, IntoValue};
pub use error::{ArityError, RuntimeError, RuntimeResult};
pub use method::{Arity, HostResult, Invoker, MethodEntry, Visibility};
pub use method_table::MethodTable;
pub use module::{ModuleId, ModuleKind, RModule};
pub use runtime::Runtime;
pub use value::Value;
