//! Parameter values.
//!
//! Values are the atomic data stored in component parameters. femcat supports
//! scalar types (Bool, Int, Float, String), homogeneous lists and references
//! to other components (Ref).

use crate::Tag;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A value that can be stored in a component parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value. Only produced for solver handoff, never accepted as input.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// List of values.
    List(Vec<Value>),
    /// Reference to another component by tag. The target kind comes from the schema.
    Ref(Tag),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float if this is a Float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a slice if this is a List value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get as tag if this is a Ref value.
    pub fn as_ref_tag(&self) -> Option<Tag> {
        match self {
            Value::Ref(tag) => Some(*tag),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Ref(_) => "Ref",
        }
    }

    /// Check if this value is greater than or equal to another (for numeric comparisons).
    /// Returns true for non-comparable types.
    pub fn gte(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(v), Value::Int(m)) => *v >= *m,
            (Value::Float(v), Value::Float(m)) => *v >= *m,
            (Value::Int(v), Value::Float(m)) => (*v as f64) >= *m,
            (Value::Float(v), Value::Int(m)) => *v >= (*m as f64),
            _ => true,
        }
    }

    /// Check if this value is less than or equal to another (for numeric comparisons).
    /// Returns true for non-comparable types.
    pub fn lte(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(v), Value::Int(m)) => *v <= *m,
            (Value::Float(v), Value::Float(m)) => *v <= *m,
            (Value::Int(v), Value::Float(m)) => (*v as f64) <= *m,
            (Value::Float(v), Value::Int(m)) => *v <= (*m as f64),
            _ => true,
        }
    }

    /// Strictly greater, with the same cross-numeric rules as [`Value::gte`].
    pub fn gt(&self, other: &Value) -> bool {
        self.gte(other) && !self.lte(other)
    }

    /// Strictly less, with the same cross-numeric rules as [`Value::lte`].
    pub fn lt(&self, other: &Value) -> bool {
        self.lte(other) && !self.gte(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Ref(tag) => write!(f, "{}", tag),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Tag> for Value {
    fn from(tag: Tag) -> Self {
        Value::Ref(tag)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Type alias for parameter storage. Ordered so listings are deterministic.
pub type Params = BTreeMap<String, Value>;

/// Helper macro to create parameter maps.
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::Params::new();
            $(
                map.insert($key.to_string(), $crate::Value::from($value));
            )+
            map
        }
    };
}
