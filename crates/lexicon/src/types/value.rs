use std::fmt;

use crate::printf::shortest_float;

/// A typed argument passed to a lookup.
///
/// Arguments drive two things: plural selection (any numeric argument
/// greater than one selects the plural variant) and substitution into the
/// template, either by the default printf-style formatter or by a custom
/// per-language formatter.
///
/// # Example
///
/// ```
/// use lexicon::Value;
///
/// let count: Value = 5.into();
/// assert!(count.exceeds_one());
///
/// let name: Value = "Alice".into();
/// assert!(!name.exceeds_one());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed integer.
    Integer(i64),

    /// An unsigned integer too wide for `Integer`.
    Unsigned(u64),

    /// A floating-point number.
    Float(f64),

    /// A text value. Never participates in plural selection, even when it
    /// looks like a number.
    Text(String),

    /// A boolean.
    Bool(bool),
}

impl Value {
    /// Returns true if this value is numeric and strictly greater than one.
    pub fn exceeds_one(&self) -> bool {
        match self {
            Value::Integer(n) => *n > 1,
            Value::Unsigned(n) => *n > 1,
            Value::Float(f) => *f > 1.0,
            Value::Text(_) | Value::Bool(_) => false,
        }
    }

    /// Get this value as a signed integer, if it is one and fits.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Unsigned(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            Value::Unsigned(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in formatting diagnostics such as `%!d(string=x)`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "int",
            Value::Unsigned(_) => "uint",
            Value::Float(_) => "float64",
            Value::Text(_) => "string",
            Value::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Unsigned(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&shortest_float(*n)),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Unsigned(n),
        }
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}
