//! Host runtime values as seen through the inspection boundary
//!
//! Values are handles: objects are referenced by `ObjectHandle`, symbols by
//! `SymbolId`. Nothing here owns runtime memory; the host decides what a
//! handle points at.
//!
//! ```text
//! Undefined | Null | Bool | Number(f64) | BigInt(i64) | String | Symbol(id) | Object(handle)
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque handle referencing an object owned by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u32);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique symbol identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// A runtime value.
///
/// Strings are reference counted so that snapshots (property lists,
/// previews) can be handed out without copying the host's string data.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// Boolean
    Bool(bool),
    /// IEEE 754 number
    Number(f64),
    /// BigInt (limited to the i64 range)
    BigInt(i64),
    /// String
    String(Arc<str>),
    /// Symbol
    Symbol(SymbolId),
    /// Any heap object, including functions and proxies
    Object(ObjectHandle),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a number value
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    /// Check if value is `null` or `undefined`
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Check if value is an object handle
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Extract the object handle
    #[inline]
    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Value::Object(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Extract a number
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a boolean
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract string contents
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `ToBoolean`
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Object(_) => true,
        }
    }

    /// `typeof`-style name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(_) => "object",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}

impl From<ObjectHandle> for Value {
    fn from(handle: ObjectHandle) -> Self {
        Value::Object(handle)
    }
}

impl From<SymbolId> for Value {
    fn from(id: SymbolId) -> Self {
        Value::Symbol(id)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Value::Undefined"),
            Value::Null => write!(f, "Value::Null"),
            Value::Bool(b) => write!(f, "Value::Bool({})", b),
            Value::Number(n) => write!(f, "Value::Number({})", n),
            Value::BigInt(n) => write!(f, "Value::BigInt({}n)", n),
            Value::String(s) => write!(f, "Value::String({:?})", s),
            Value::Symbol(id) => write!(f, "Value::Symbol(#{})", id.0),
            Value::Object(h) => write!(f, "Value::Object(#{})", h.0),
        }
    }
}

/// A property key: either a string or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKey {
    /// String key
    String(Arc<str>),
    /// Symbol key
    Symbol(SymbolId),
}

/// Largest array index plus one (`2^32 - 1`); also the array length ceiling.
pub const ARRAY_INDEX_LIMIT: u64 = u32::MAX as u64;

/// Parse a canonical array index: `0` or a digit string without a leading
/// zero whose value is below [`ARRAY_INDEX_LIMIT`].
///
/// Digit strings at or past the limit are ordinary string keys, not indices.
pub fn array_index(key: &str) -> Option<u32> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || bytes.len() > 10 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes[0] == b'0' && bytes.len() > 1 {
        return None;
    }
    let n: u64 = key.parse().ok()?;
    if n < ARRAY_INDEX_LIMIT {
        Some(n as u32)
    } else {
        None
    }
}

impl PropertyKey {
    /// Array index this key denotes, if any
    pub fn array_index(&self) -> Option<u32> {
        match self {
            PropertyKey::String(s) => array_index(s),
            PropertyKey::Symbol(_) => None,
        }
    }

    /// Check if this is a symbol key
    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// String contents of a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{}", s),
            PropertyKey::Symbol(id) => write!(f, "Symbol(#{})", id.0),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.into())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s.into())
    }
}

impl From<SymbolId> for PropertyKey {
    fn from(id: SymbolId) -> Self {
        PropertyKey::Symbol(id)
    }
}

impl From<PropertyKey> for Value {
    fn from(key: PropertyKey) -> Self {
        match key {
            PropertyKey::String(s) => Value::String(s),
            PropertyKey::Symbol(id) => Value::Symbol(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullish() {
        assert!(Value::Undefined.is_nullish());
        assert!(Value::Null.is_nullish());
        assert!(!Value::Bool(false).is_nullish());
        assert!(!Value::from(0).is_nullish());
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::BigInt(0).is_truthy());
        assert!(Value::from("0").is_truthy());
        assert!(Value::from(-1).is_truthy());
        assert!(Value::from(ObjectHandle(0)).is_truthy());
    }

    #[test]
    fn test_object_extraction() {
        let v = Value::from(ObjectHandle(7));
        assert!(v.is_object());
        assert_eq!(v.as_object(), Some(ObjectHandle(7)));
        assert_eq!(Value::from("x").as_object(), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::BigInt(0).type_name(), "bigint");
        assert_eq!(Value::Symbol(SymbolId(1)).type_name(), "symbol");
        assert_eq!(Value::from(ObjectHandle(0)).type_name(), "object");
    }

    #[test]
    fn test_property_key_into_value() {
        assert_eq!(Value::from(PropertyKey::from("a")), Value::from("a"));
        assert_eq!(
            Value::from(PropertyKey::Symbol(SymbolId(3))),
            Value::Symbol(SymbolId(3))
        );
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("4294967294"), Some(4_294_967_294));
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("99999999999"), None);
        assert_eq!(array_index("007"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index(""), None);
        assert_eq!(PropertyKey::Symbol(SymbolId(1)).array_index(), None);
    }

    #[test]
    fn test_debug_format() {
        let s = format!("{:?}", Value::BigInt(0));
        assert!(s.contains("0n"));
        let s = format!("{:?}", Value::from("hi"));
        assert!(s.contains("\"hi\""));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Value::from(ObjectHandle(2))).unwrap();
        assert_eq!(json, r#"{"Object":2}"#);
    }
}
