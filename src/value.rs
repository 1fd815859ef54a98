//! Owned NBON values.

use crate::encoding::Type;

/// An owned NBON value.
///
/// Objects keep their entries in the order they were written, duplicates included.
///
/// Integers compare by numeric value, so `Int(3)` equals `UInt(3)`. Floats compare by
/// bit pattern, so `NaN` equals itself and `0.0` does not equal `-0.0`.
#[derive(Clone, Debug)]
pub enum Value {
    /// `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Single precision float.
    Float(f32),
    /// Double precision float.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Binary(Vec<u8>),
    /// Array of values.
    Array(Vec<Value>),
    /// Key-value entries.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// The [`Type`] this value is encoded as.
    ///
    /// # Example
    ///
    /// ```
    /// use nbon::prelude::*;
    ///
    /// assert_eq!(Value::from(-1).type_of(), Type::Int);
    /// assert_eq!(Value::from(1).type_of(), Type::UInt);
    /// ```
    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(_) => Type::Bool,
            Value::Int(i) if *i >= 0 => Type::UInt,
            Value::Int(_) => Type::Int,
            Value::UInt(_) => Type::UInt,
            Value::Float(_) => Type::Float,
            Value::Double(_) => Type::Double,
            Value::String(_) => Type::String,
            Value::Binary(_) => Type::Binary,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    /// Is this value `null`?
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            _ => false,
        }
    }

    /// The value as an `i64`, if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) if *u <= i64::max_value() as u64 => Some(*u as i64),
            _ => None,
        }
    }

    /// The value as a `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) if *i >= 0 => Some(*i as u64),
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(vs) => Some(vs.as_slice()),
            _ => None,
        }
    }

    /// Looks up the first entry with key `key`, if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => {
                entries
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(_), Value::Int(_))
            | (Value::Int(_), Value::UInt(_))
            | (Value::UInt(_), Value::Int(_))
            | (Value::UInt(_), Value::UInt(_)) => {
                match (self.as_u64(), other.as_u64()) {
                    (Some(a), Some(b)) => a == b,
                    (None, None) => self.as_i64() == other.as_i64(),
                    _ => false,
                }
            }
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

from_fn!(Value, bool, Value::Bool);
from_fn!(Value, f32, Value::Float);
from_fn!(Value, f64, Value::Double);
from_fn!(Value, String, Value::String);
from_fn!(Value, Vec<u8>, Value::Binary);
from_fn!(Value, Vec<Value>, Value::Array);
from_fn!(Value, Vec<(String, Value)>, Value::Object);
from_fn!(Value, &str, |s: &str| Value::String(s.to_owned()));
from_fn!(Value, &[u8], |b: &[u8]| Value::Binary(b.to_vec()));
from_fn!(Value, (), |_| Value::Null);

from_fn!(Value, u64, Value::UInt);
from_as!(Value, u8, u64);
from_as!(Value, u16, u64);
from_as!(Value, u32, u64);
from_as!(Value, usize, u64);

from_fn!(Value, i64, |i: i64| {
    if i < 0 {
        Value::Int(i)
    } else {
        Value::UInt(i as u64)
    }
});
from_as!(Value, i8, i64);
from_as!(Value, i16, i64);
from_as!(Value, i32, i64);
from_as!(Value, isize, i64);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value {
        match o {
            Some(t) => t.into(),
            None => Value::Null,
        }
    }
}
