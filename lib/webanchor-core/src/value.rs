//! Argument values.
//!
//! Every argument of an invocation is captured as a [`Value`]. Simple values
//! are formatted into route tokens and query pairs by the transformer
//! pipeline; structured values are captured through serde as
//! [`Value::Json`] and handed to a content serializer.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{SerializeMap, SerializeSeq};

use crate::{ParameterRole, Result};

/// A value that knows how to format itself.
///
/// Formattable values take precedence over the default formatting of the
/// pipeline. The optional pattern comes from a
/// [`ParamTag::Format`](crate::ParamTag::Format) tag on the parameter.
///
/// # Example
///
/// ```
/// use std::fmt;
/// use webanchor_core::Formattable;
///
/// #[derive(Debug)]
/// struct Money(i64);
///
/// impl fmt::Display for Money {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
///     }
/// }
///
/// impl Formattable for Money {
///     fn format(&self, pattern: Option<&str>) -> String {
///         match pattern {
///             Some("cents") => self.0.to_string(),
///             _ => self.to_string(),
///         }
///     }
/// }
/// ```
pub trait Formattable: fmt::Display + fmt::Debug + Send + Sync + 'static {
    /// Format the value, optionally following a pattern.
    fn format(&self, pattern: Option<&str>) -> String {
        let _ = pattern;
        self.to_string()
    }
}

/// A named argument carrying its own role, element of [`Value::Pairs`].
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    /// Parameter name.
    pub name: String,
    /// Role of the parameter produced from this pair.
    pub role: ParameterRole,
    /// Pair value.
    pub value: Value,
}

impl NamedArg {
    /// A pair that becomes a route parameter.
    pub fn route(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            role: ParameterRole::Route,
            value: value.into(),
        }
    }

    /// A pair that becomes a query parameter.
    pub fn query(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            role: ParameterRole::Query,
            value: value.into(),
        }
    }
}

/// The value of one call argument.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value; the argument is dropped before classification.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// Point in time.
    DateTime(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
    /// Sequence, expanded into one parameter per element.
    List(Vec<Value>),
    /// Named route/query pairs, expanded into one parameter per pair.
    Pairs(Vec<NamedArg>),
    /// Structured value captured through serde.
    Json(serde_json::Value),
    /// Value with its own formatting.
    Custom(Arc<dyn Formattable>),
}

impl Value {
    /// Capture any serializable value, typically a request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value).map(Self::Json).map_err(Into::into)
    }

    /// Wrap a value with its own formatting.
    pub fn custom(value: impl Formattable) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Build a list of named route/query pairs.
    pub fn pairs(pairs: impl IntoIterator<Item = NamedArg>) -> Self {
        Self::Pairs(pairs.into_iter().collect())
    }

    /// Returns `true` for an absent value.
    ///
    /// A JSON `null` counts as absent too.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(serde_json::Value::Null))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Pairs(a), Self::Pairs(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Raw textual representation, used when no resolver formatted the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::DateTime(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{value}"),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Pairs(pairs) => {
                for (index, pair) in pairs.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}={}", pair.name, pair.value)?;
                }
                Ok(())
            }
            Self::Json(serde_json::Value::String(value)) => f.write_str(value),
            Self::Json(value) => write!(f, "{value}"),
            Self::Custom(value) => write!(f, "{value}"),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::UInt(value) => serializer.serialize_u64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::DateTime(value) => serializer.serialize_str(&value.to_rfc3339()),
            Self::Date(value) => serializer.collect_str(&value.format("%Y-%m-%d")),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Pairs(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for pair in pairs {
                    map.serialize_entry(&pair.name, &pair.value)?;
                }
                map.end()
            }
            Self::Json(value) => value.serialize(serializer),
            Self::Custom(value) => serializer.serialize_str(&value.format(None)),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
    &str => Str as String,
    char => Str as String,
    DateTime<Utc> => DateTime as DateTime<Utc>,
    NaiveDate => Date as NaiveDate,
    serde_json::Value => Json as serde_json::Value,
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}
