//! Untyped values.
//!
//! [`Value`] is a closed tagged variant standing in for "anything": the plain
//! members of the constrained type set, a typed pointer that may be null, and
//! the reference-like kinds (list, map, function handle) that may also be
//! present-but-null. Nilness and truthiness are decided by matching on these
//! cases rather than by runtime inspection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// documents decoded elsewhere can be brought in as mappings
use serde_json::Value as Json;

use crate::datatype::{Decimal, FieldType, Kind, Timestamp};

/// A string-keyed mapping of untyped values.
pub type Mapping = HashMap<String, Value>;

/// An opaque function handle.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}
impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Callback(..)")
    }
}
impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(String),
    Time(Timestamp),
    Decimal(Decimal),
    /// A pointer to a value of the given kind, null when `None`.
    Ptr(Kind, Option<Box<Value>>),
    List(Option<Vec<Value>>),
    Map(Option<Mapping>),
    Func(Option<Callback>),
}

impl Value {
    /// Points at `value`. Pointing at nil yields nil.
    pub fn ptr(value: impl Into<Value>) -> Value {
        let value = value.into();
        match value.kind() {
            Some(kind) => Value::Ptr(kind, Some(Box::new(value))),
            None => Value::Nil,
        }
    }
    pub fn null_ptr(kind: Kind) -> Value {
        Value::Ptr(kind, None)
    }
    pub fn kind(&self) -> Option<Kind> {
        let kind = match self {
            Value::Nil => return None,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Str(_) => Kind::Str,
            Value::Time(_) => Kind::Time,
            Value::Decimal(_) => Kind::Decimal,
            Value::Ptr(..) => Kind::Ptr,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Func(_) => Kind::Func,
        };
        Some(kind)
    }
    /// The value behind a non-null pointer.
    pub fn pointee(&self) -> Option<&Value> {
        match self {
            Value::Ptr(_, Some(inner)) => Some(inner),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
    pub fn into_mapping(self) -> Option<Mapping> {
        match self {
            Value::Map(mapping) => mapping,
            _ => None,
        }
    }
    /// True for nil itself and for a pointer, list, map or function handle
    /// that is present but points nowhere.
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Nil | Value::Ptr(_, None) | Value::List(None) | Value::Map(None) | Value::Func(None)
        )
    }
    /// Falsy values are nil (including null handles), numeric zero, the empty
    /// string and `false`, looked at through one pointer indirection.
    /// Everything else, timestamps included, is truthy. Decimals are numbers
    /// here too: a zero decimal of any scale is falsy, not truthy by default.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Ptr(_, Some(inner)) if !matches!(**inner, Value::Ptr(..)) => inner.truthiness(),
            other => other.truthiness(),
        }
    }
    fn truthiness(&self) -> bool {
        match self {
            v if v.is_nil() => false,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::I8(v) => *v != 0,
            Value::I16(v) => *v != 0,
            Value::I32(v) => *v != 0,
            Value::I64(v) => *v != 0,
            Value::Isize(v) => *v != 0,
            Value::U8(v) => *v != 0,
            Value::U16(v) => *v != 0,
            Value::U32(v) => *v != 0,
            Value::U64(v) => *v != 0,
            Value::Usize(v) => *v != 0,
            Value::F32(v) => *v != 0.0,
            Value::F64(v) => *v != 0.0,
            Value::Decimal(d) => !d.is_zero(),
            _ => true,
        }
    }
}

/// Whether `value` is absent, or a typed handle that points nowhere.
pub fn is_nil(value: &Value) -> bool {
    value.is_nil()
}

impl<T: FieldType> From<T> for Value {
    fn from(value: T) -> Self {
        value.into_value()
    }
}
impl<T: FieldType> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Ptr(T::KIND, value.map(|v| Box::new(v.into_value())))
    }
}
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}
impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(Some(values))
    }
}
impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Map(Some(mapping))
    }
}
impl From<Callback> for Value {
    fn from(callback: Callback) -> Self {
        Value::Func(Some(callback))
    }
}
impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    n.as_f64().map(Value::F64).unwrap_or(Value::Nil)
                }
            }
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(Some(items.into_iter().map(Value::from).collect())),
            Json::Object(fields) => Value::Map(Some(
                fields.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}
