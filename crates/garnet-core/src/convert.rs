//! Conversion traits between runtime values and Rust types
//!
//! `FromValue` / `IntoValue` cover primitive host types. `IntoHostResult`
//! normalises whatever a host function returns into a `HostResult`, which is
//! what the `#[method]` attribute relies on.

use std::sync::Arc;

use crate::error::{RuntimeError, RuntimeResult};
use crate::method::HostResult;
use crate::value::Value;

/// Convert from a runtime value to a Rust type.
pub trait FromValue: Sized {
    /// Convert, returning a type error if the value doesn't match.
    fn from_value(value: &Value) -> RuntimeResult<Self>;
}

/// Convert from a Rust type to a runtime value.
pub trait IntoValue {
    /// Convert to a value
    fn into_value(self) -> Value;
}

fn mismatch(expected: &str, got: &Value) -> RuntimeError {
    RuntimeError::TypeMismatch {
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> RuntimeResult<Self> {
        value.as_integer().ok_or_else(|| mismatch("Integer", value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> RuntimeResult<Self> {
        value.as_float().ok_or_else(|| mismatch("Float", value))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> RuntimeResult<Self> {
        value.as_bool().ok_or_else(|| mismatch("Boolean", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> RuntimeResult<Self> {
        match value {
            Value::Str(s) => Ok(s.to_string()),
            other => Err(mismatch("String", other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> RuntimeResult<Self> {
        Ok(value.clone())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(Arc::from(self))
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(Arc::from(self))
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

/// Normalise a host function's return value.
///
/// `()` becomes "no value"; the caller of the invoker turns that into `nil`.
pub trait IntoHostResult {
    /// Convert to a `HostResult`
    fn into_host_result(self) -> HostResult;
}

impl IntoHostResult for () {
    fn into_host_result(self) -> HostResult {
        Ok(None)
    }
}

impl IntoHostResult for Value {
    fn into_host_result(self) -> HostResult {
        Ok(Some(self))
    }
}

impl IntoHostResult for Option<Value> {
    fn into_host_result(self) -> HostResult {
        Ok(self)
    }
}

impl<T: IntoHostResult> IntoHostResult for Result<T, RuntimeError> {
    fn into_host_result(self) -> HostResult {
        self.and_then(IntoHostResult::into_host_result)
    }
}
