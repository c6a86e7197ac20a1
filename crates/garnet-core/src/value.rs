//! Value: the dynamically typed value handed to host functions
//!
//! Values are cheap to clone: heap payloads (strings, symbols, arrays) are
//! reference-counted, everything else is stored inline.

use std::fmt;
use std::sync::Arc;

use crate::module::ModuleId;

/// Dynamically typed runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// The canonical "no value" result
    #[default]
    Nil,
    /// `true` / `false`
    Bool(bool),
    /// Fixnum-range integer
    Integer(i64),
    /// Double precision float
    Float(f64),
    /// Immutable string
    Str(Arc<str>),
    /// Interned-style symbol (`:name`)
    Symbol(Arc<str>),
    /// Array of values
    Array(Arc<Vec<Value>>),
    /// Reference to a module or class in the runtime registry
    Module(ModuleId),
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Create a symbol value
    pub fn symbol(s: impl Into<Arc<str>>) -> Self {
        Value::Symbol(s.into())
    }

    /// Create an array value
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    // ========================================================================
    // Type checks
    // ========================================================================

    /// Truthiness: everything except `nil` and `false` is true.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get string contents for strings and symbols
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get array elements
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Name of the value's type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Module(_) => "Module",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Module(a), Value::Module(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, ":{}", s),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Module(id) => write!(f, "#<Module {}>", id.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::string("").is_truthy());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Integer(7).as_integer(), Some(7));
        assert_eq!(Value::Integer(7).as_float(), Some(7.0));
        assert_eq!(Value::symbol("foo").as_str(), Some("foo"));
        assert_eq!(Value::Nil.as_bool(), None);

        let arr = Value::array(vec![Value::Integer(1), Value::Nil]);
        assert_eq!(arr.as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_string_and_symbol_are_distinct() {
        assert_ne!(Value::string("a"), Value::symbol("a"));
        assert_eq!(Value::string("a"), Value::string("a"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Nil.type_name(), "NilClass");
        assert_eq!(Value::Bool(true).type_name(), "TrueClass");
        assert_eq!(Value::Float(1.5).type_name(), "Float");
    }
}
