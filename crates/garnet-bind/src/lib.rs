//! Garnet bind - installs annotated host functions as runtime methods
//!
//! Host functions carry binding metadata (a `MethodDescriptor`), written
//! either with the `#[method]` attribute from `garnet-macros`, with
//! `DescriptorBuilder`, or as a TOML `BindingManifest`. A `Binder` turns each
//! descriptor into a shared invoker plus one `MethodEntry` per target table.
//!
//! # Example
//!
//! ```ignore
//! use garnet_bind::{method, DefineMethods, DescriptorError, HostType, MethodDescriptor};
//! use garnet_bind::garnet_core::{Runtime, Value};
//!
//! #[method(name = "initialize", required = 1)]
//! fn initialize(_recv: &Value, _size: &Value) {}
//!
//! #[method(name = "size", alias = "length")]
//! fn size(_recv: &Value) -> Value {
//!     Value::Integer(0)
//! }
//!
//! struct Wombat;
//!
//! impl HostType for Wombat {
//!     const NAME: &'static str = "Wombat";
//!
//!     fn descriptors() -> Result<Vec<MethodDescriptor>, DescriptorError> {
//!         Ok(vec![initialize_descriptor()?, size_descriptor()?])
//!     }
//! }
//!
//! let runtime = Runtime::new();
//! let class = runtime.define_class("Wombat", None);
//! runtime.define_annotated_methods::<Wombat>(class)?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod arity;
pub mod binder;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod ownership;
pub mod version;

pub use adapter::{synthesize, AdapterShape, HostFunction};
pub use arity::{ArityPolicy, CheckArity};
pub use binder::{Binder, BindingResult, BoundMethod, DefineMethods, HostType};
pub use descriptor::{DeclaredVisibility, DescriptorBuilder, MethodDescriptor};
pub use error::{BindError, DescriptorError};
pub use manifest::{BindingManifest, HostFunctionRegistry, ManifestError, ManifestMethod};
pub use ownership::{effective_visibility, install_targets, InstallTarget, TargetScope};
pub use version::Selection;

pub use garnet_macros::method;

// Generated code refers to the core types through this path
pub use garnet_core;
