// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source values.
//!
//! A data source maps field paths to `Value`s. A value either arrives as text, which is
//! coerced into the destination type, or as an already-typed Rust value, which is assigned
//! directly when its type matches the destination.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A value supplied by a configuration source.
///
/// # Examples
///
/// ```
/// use cfgbind::domain::Value;
/// use std::time::Duration;
///
/// let text = Value::from("1");
/// assert_eq!(text.as_text(), Some("1"));
///
/// let typed = Value::typed(Duration::from_secs(56));
/// assert!(typed.as_text().is_none());
/// ```
#[derive(Clone)]
pub enum Value {
    /// A string, coerced into non-string destinations.
    Text(String),
    /// An already-typed value, assigned only to fields of the same type.
    Typed(TypedValue),
}

impl Value {
    /// Creates a text value.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// Creates a typed value.
    pub fn typed<V: Any + Clone + Send + Sync>(value: V) -> Self {
        Value::Typed(TypedValue::new(value))
    }

    /// Returns the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Typed(_) => None,
        }
    }

    /// Returns the Rust type name of the carried value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => type_name::<String>(),
            Value::Typed(typed) => typed.type_name(),
        }
    }

    /// Produces a fresh boxed copy of the carried value for direct assignment.
    pub fn to_any(&self) -> Box<dyn Any> {
        match self {
            Value::Text(text) => Box::new(text.clone()),
            Value::Typed(typed) => typed.to_any(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::Typed(typed) => f.debug_tuple("Typed").field(typed).finish(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<TypedValue> for Value {
    fn from(typed: TypedValue) -> Self {
        Value::Typed(typed)
    }
}

macro_rules! typed_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::typed(value)
                }
            }
        )*
    };
}

typed_from!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    char,
    Duration,
    url::Url,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::DateTime<chrono::Utc>,
);

/// A cloneable, type-erased value.
///
/// Each assignment receives its own copy, so a source holding typed values can be applied
/// any number of times.
#[derive(Clone)]
pub struct TypedValue {
    type_name: &'static str,
    make: Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>,
}

impl TypedValue {
    /// Wraps a value.
    pub fn new<V: Any + Clone + Send + Sync>(value: V) -> Self {
        Self {
            type_name: type_name::<V>(),
            make: Arc::new(move || Box::new(value.clone()) as Box<dyn Any>),
        }
    }

    /// Returns the Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns a boxed copy of the wrapped value.
    pub fn to_any(&self) -> Box<dyn Any> {
        (self.make)()
    }
}

impl fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
