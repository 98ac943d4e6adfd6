// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-type coercion strategies.
//!
//! Every type that can sit in a bindable field implements [`Setting`]. The trait fixes the
//! field's [`Kind`], its zero value (used to allocate unset pointers) and how text is turned
//! into a value of the type:
//!
//! - timestamps parse as RFC 3339 and URLs as URLs;
//! - `Duration` parses an integer count of nanoseconds;
//! - types implementing [`FromText`] parse themselves;
//! - everything else is decoded as structured data (JSON) via [`decode_data`].
//!
//! Content decoders hand each field a node of the decoded document instead of text. Types
//! with a serde representation take the node through [`decode_document`]; the others parse
//! string nodes as text.
//!
//! `Option<T>` is a single level of pointer: it parses as `T` and is allocated lazily.
//! `Box<T>` is transparent.

use crate::domain::errors::BoxError;
use crate::ports::field::{Allocation, Field, Kind, Record};
use chrono::{DateTime, FixedOffset, Utc};
use serde::de::DeserializeOwned;
use std::any::{type_name, Any};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// A node of a decoded structured document.
pub use serde_json::Value as Document;

/// A type that can be bound to a field.
///
/// Implement it through [`bind_record!`](crate::bind_record) for structs with nested
/// fields, [`text_setting!`](crate::text_setting) for types implementing [`FromText`] and
/// [`data_setting!`](crate::data_setting) for serde-deserializable leaf types.
pub trait Setting: Any + Sized {
    /// The declared kind of fields of this type.
    const KIND: Kind;

    /// The zero value installed when an unset pointer to this type is allocated.
    ///
    /// `None` when the type has no natural zero value.
    fn zero() -> Option<Self>;

    /// Parses text into a value of this type.
    fn parse_text(text: &str) -> Result<Self, BoxError>;

    /// Decodes a node of a structured document into a value of this type.
    ///
    /// String nodes are parsed as text; any other node is parsed from its JSON rendering.
    fn parse_document(document: Document) -> Result<Self, BoxError> {
        match document {
            Document::String(text) => Self::parse_text(&text),
            other => Self::parse_text(&other.to_string()),
        }
    }

    /// Returns `true` for pointers holding no value.
    fn is_vacant(&self) -> bool {
        false
    }

    /// Allocates the pointee of an unset pointer.
    fn fill_vacant(&mut self) -> Allocation {
        Allocation::Present
    }

    /// Returns the nested record, if this type has addressable fields.
    fn record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// Returns `true` for records and for pointers to records.
    fn is_record_kind() -> bool {
        Self::KIND == Kind::Record
    }

    /// Takes a typed value of exactly this type.
    fn accept(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = value.downcast::<Self>()?;
        *self = *value;
        Ok(())
    }
}

/// Types that parse themselves from raw text.
///
/// This is the extension point for domain types with their own textual syntax. Register an
/// implementor as a setting with [`text_setting!`](crate::text_setting).
///
/// # Examples
///
/// ```
/// use cfgbind::domain::errors::BoxError;
/// use cfgbind::domain::FromText;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Level(u8);
///
/// impl FromText for Level {
///     fn from_text(text: &[u8]) -> Result<Self, BoxError> {
///         match text {
///             b"low" => Ok(Level(1)),
///             b"high" => Ok(Level(9)),
///             _ => Err("unknown level".into()),
///         }
///     }
/// }
///
/// assert_eq!(Level::from_text(b"high").unwrap(), Level(9));
/// ```
pub trait FromText: Sized {
    /// Parses the value from its textual form.
    fn from_text(text: &[u8]) -> Result<Self, BoxError>;
}

/// Decodes text as a structured-data (JSON) literal.
///
/// Text that is not valid JSON is retried as a JSON string, so bare words such as
/// `Fredrik` decode into string-like types. The original JSON error is returned when both
/// attempts fail.
///
/// # Examples
///
/// ```
/// use cfgbind::domain::setting::decode_data;
///
/// let n: i64 = decode_data("1").unwrap();
/// assert_eq!(n, 1);
///
/// let name: Option<String> = decode_data("Fredrik").unwrap();
/// assert_eq!(name.as_deref(), Some("Fredrik"));
///
/// assert!(decode_data::<i64>("Fredrik").is_err());
/// ```
pub fn decode_data<T: DeserializeOwned>(text: &str) -> Result<T, BoxError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(err) if err.is_syntax() || err.is_eof() => {
            serde_json::from_value(serde_json::Value::String(text.to_string()))
                .map_err(|_| err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Decodes a structured document node through the type's serde representation.
pub fn decode_document<T: DeserializeOwned>(document: Document) -> Result<T, BoxError> {
    Ok(serde_json::from_value(document)?)
}

/// Parses text as an RFC 3339 timestamp.
pub fn parse_rfc3339(text: &str) -> Result<DateTime<FixedOffset>, BoxError> {
    Ok(DateTime::parse_from_rfc3339(text)?)
}

/// Parses text as an integer number of nanoseconds.
pub fn parse_nanos(text: &str) -> Result<Duration, BoxError> {
    let nanos: u64 = text.trim().parse()?;
    Ok(Duration::from_nanos(nanos))
}

impl<T: Setting> Field for T {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn is_zero(&self) -> bool {
        self.is_vacant()
    }

    fn allocate(&mut self) -> Allocation {
        self.fill_vacant()
    }

    fn record_mut(&mut self) -> Option<&mut dyn Record> {
        self.record()
    }

    fn holds_record(&self) -> bool {
        T::is_record_kind()
    }

    fn set_value(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        self.accept(value)
    }

    fn set_text(&mut self, text: &str) -> Result<(), BoxError> {
        *self = T::parse_text(text)?;
        Ok(())
    }

    fn set_document(&mut self, document: Document) -> Result<(), BoxError> {
        *self = T::parse_document(document)?;
        Ok(())
    }
}

impl<T: Setting> Setting for Option<T> {
    const KIND: Kind = Kind::Pointer;

    fn zero() -> Option<Self> {
        Some(None)
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        T::parse_text(text).map(Some)
    }

    fn parse_document(document: Document) -> Result<Self, BoxError> {
        match document {
            Document::Null => Ok(None),
            other => T::parse_document(other).map(Some),
        }
    }

    fn is_vacant(&self) -> bool {
        self.is_none()
    }

    fn fill_vacant(&mut self) -> Allocation {
        if self.is_some() {
            return Allocation::Present;
        }
        if T::KIND == Kind::Pointer {
            return Allocation::Unsupported;
        }
        match T::zero() {
            Some(zero) => {
                *self = Some(zero);
                Allocation::Allocated
            }
            None => Allocation::Deferred,
        }
    }

    fn is_record_kind() -> bool {
        T::KIND == Kind::Record
    }

    fn record(&mut self) -> Option<&mut dyn Record> {
        if self.is_none() {
            if T::KIND != Kind::Record {
                return None;
            }
            *self = Some(T::zero()?);
        }
        self.as_mut()?.record()
    }

    fn accept(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = match value.downcast::<Self>() {
            Ok(value) => {
                *self = *value;
                return Ok(());
            }
            Err(value) => value,
        };
        let value = value.downcast::<T>()?;
        *self = Some(*value);
        Ok(())
    }
}

impl<T: Setting> Setting for Box<T> {
    const KIND: Kind = T::KIND;

    fn zero() -> Option<Self> {
        T::zero().map(Box::new)
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        T::parse_text(text).map(Box::new)
    }

    fn parse_document(document: Document) -> Result<Self, BoxError> {
        T::parse_document(document).map(Box::new)
    }

    fn is_vacant(&self) -> bool {
        (**self).is_vacant()
    }

    fn fill_vacant(&mut self) -> Allocation {
        (**self).fill_vacant()
    }

    fn record(&mut self) -> Option<&mut dyn Record> {
        (**self).record()
    }

    fn accept(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        let value = match value.downcast::<Self>() {
            Ok(value) => {
                *self = *value;
                return Ok(());
            }
            Err(value) => value,
        };
        (**self).accept(value)
    }
}

impl Setting for String {
    const KIND: Kind = Kind::String;

    fn zero() -> Option<Self> {
        Some(String::new())
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.to_string())
    }

    fn parse_document(document: Document) -> Result<Self, BoxError> {
        decode_document(document)
    }
}

macro_rules! data_settings {
    ($kind:expr => $($ty:ty),* $(,)?) => {
        $(
            impl Setting for $ty {
                const KIND: Kind = $kind;

                fn zero() -> Option<Self> {
                    Some(<$ty>::default())
                }

                fn parse_text(text: &str) -> Result<Self, BoxError> {
                    decode_data(text)
                }

                fn parse_document(document: Document) -> Result<Self, BoxError> {
                    decode_document(document)
                }
            }
        )*
    };
}

data_settings!(Kind::Bool => bool);
data_settings!(Kind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
data_settings!(Kind::Float => f32, f64);
data_settings!(Kind::Data => char, serde_json::Value);

impl<T: DeserializeOwned + 'static> Setting for Vec<T> {
    const KIND: Kind = Kind::Data;

    fn zero() -> Option<Self> {
        Some(Vec::new())
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        decode_data(text)
    }

    fn parse_document(document: Document) -> Result<Self, BoxError> {
        decode_document(document)
    }
}

impl Setting for Duration {
    const KIND: Kind = Kind::Duration;

    fn zero() -> Option<Self> {
        Some(Duration::ZERO)
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        parse_nanos(text)
    }
}

impl Setting for DateTime<FixedOffset> {
    const KIND: Kind = Kind::Timestamp;

    fn zero() -> Option<Self> {
        Some(DateTime::<Utc>::default().into())
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        parse_rfc3339(text)
    }
}

impl Setting for DateTime<Utc> {
    const KIND: Kind = Kind::Timestamp;

    fn zero() -> Option<Self> {
        Some(DateTime::<Utc>::default())
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        Ok(parse_rfc3339(text)?.with_timezone(&Utc))
    }
}

impl Setting for Url {
    const KIND: Kind = Kind::Url;

    fn zero() -> Option<Self> {
        None
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        Ok(Url::parse(text)?)
    }
}

macro_rules! from_str_settings {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromText for $ty {
                fn from_text(text: &[u8]) -> Result<Self, BoxError> {
                    Ok(std::str::from_utf8(text)?.parse::<$ty>()?)
                }
            }

            impl Setting for $ty {
                const KIND: Kind = Kind::Text;

                fn zero() -> Option<Self> {
                    None
                }

                fn parse_text(text: &str) -> Result<Self, BoxError> {
                    <$ty as FromText>::from_text(text.as_bytes())
                }
            }
        )*
    };
}

from_str_settings!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl FromText for PathBuf {
    fn from_text(text: &[u8]) -> Result<Self, BoxError> {
        Ok(PathBuf::from(std::str::from_utf8(text)?))
    }
}

impl Setting for PathBuf {
    const KIND: Kind = Kind::Text;

    fn zero() -> Option<Self> {
        Some(PathBuf::new())
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        <PathBuf as FromText>::from_text(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_numbers() {
        assert_eq!(i64::parse_text("1").unwrap(), 1);
        assert_eq!(u8::parse_text("255").unwrap(), 255);
        assert!(u8::parse_text("256").is_err());
        assert!((f64::parse_text("3.5").unwrap() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_data_rejects_fractional_integer() {
        assert!(i32::parse_text("1.5").is_err());
    }

    #[test]
    fn test_decode_data_bool() {
        assert!(bool::parse_text("true").unwrap());
        assert!(!bool::parse_text("false").unwrap());
        assert!(bool::parse_text("yes").is_err());
    }

    #[test]
    fn test_decode_data_bare_word_as_string() {
        assert_eq!(char::parse_text("x").unwrap(), 'x');
        let value = serde_json::Value::parse_text("Fredrik").unwrap();
        assert_eq!(value, serde_json::Value::String("Fredrik".to_string()));
    }

    #[test]
    fn test_decode_data_keeps_original_error() {
        let err = i64::parse_text("Fredrik").unwrap_err();
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn test_decode_data_vec() {
        let values = Vec::<u32>::parse_text("[1, 2, 3]").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(String::parse_text("\"quoted\"").unwrap(), "\"quoted\"");
    }

    #[test]
    fn test_duration_is_nanoseconds() {
        assert_eq!(Duration::parse_text("56").unwrap(), Duration::from_nanos(56));
        assert!(Duration::parse_text("56s").is_err());
        assert!(Duration::parse_text("-1").is_err());
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = DateTime::<FixedOffset>::parse_text("2012-11-01T22:08:41+00:00").unwrap();
        assert_eq!(ts.timestamp(), 1_351_807_721);
        assert!(DateTime::<FixedOffset>::parse_text("2012-11-01 22:08").is_err());

        let utc = DateTime::<Utc>::parse_text("2012-11-01T23:08:41+01:00").unwrap();
        assert_eq!(utc.timestamp(), 1_351_807_721);
    }

    #[test]
    fn test_url_parse() {
        let url = Url::parse_text("https://www.rust-lang.org").unwrap();
        assert_eq!(url.host_str(), Some("www.rust-lang.org"));
        assert!(Url::parse_text("not a url").is_err());
    }

    #[test]
    fn test_from_text_types() {
        let ip = IpAddr::parse_text("127.0.0.1").unwrap();
        assert!(ip.is_loopback());
        assert!(SocketAddr::parse_text("localhost").is_err());
        assert_eq!(
            PathBuf::parse_text("/etc/app.json").unwrap(),
            PathBuf::from("/etc/app.json")
        );
    }

    #[test]
    fn test_option_unwraps_one_level() {
        let url = Option::<Url>::parse_text("https://example.com").unwrap();
        assert!(url.is_some());
        assert_eq!(Option::<i32>::KIND, Kind::Pointer);
    }

    #[test]
    fn test_option_fill_vacant() {
        let mut value: Option<i32> = None;
        assert!(value.is_vacant());
        assert_eq!(value.fill_vacant(), Allocation::Allocated);
        assert_eq!(value, Some(0));
        assert_eq!(value.fill_vacant(), Allocation::Present);
    }

    #[test]
    fn test_option_fill_vacant_without_zero_is_deferred() {
        let mut value: Option<Url> = None;
        assert_eq!(value.fill_vacant(), Allocation::Deferred);
        assert!(value.is_none());
    }

    #[test]
    fn test_double_pointer_is_unsupported() {
        let mut value: Option<Option<i32>> = None;
        assert_eq!(value.fill_vacant(), Allocation::Unsupported);
        assert!(value.is_none());

        let mut boxed: Option<Box<Option<i32>>> = None;
        assert_eq!(boxed.fill_vacant(), Allocation::Unsupported);
    }

    #[test]
    fn test_is_record_kind() {
        assert!(!i32::is_record_kind());
        assert!(!Option::<i32>::is_record_kind());
        assert!(!Option::<Option<i32>>::is_record_kind());
    }

    #[test]
    fn test_option_record_does_not_allocate_leaves() {
        let mut value: Option<i32> = None;
        assert!(value.record().is_none());
        assert!(value.is_none());
    }

    #[test]
    fn test_accept_exact_type() {
        let mut value: i64 = 0;
        assert!(value.accept(Box::new(5i64)).is_ok());
        assert_eq!(value, 5);
        assert!(value.accept(Box::new(5i32)).is_err());
    }

    #[test]
    fn test_option_accepts_pointee_and_pointer() {
        let mut value: Option<Duration> = None;
        value.accept(Box::new(Duration::from_secs(1))).unwrap();
        assert_eq!(value, Some(Duration::from_secs(1)));
        value.accept(Box::new(None::<Duration>)).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_box_is_transparent() {
        assert_eq!(Box::<i32>::KIND, Kind::Integer);
        let mut value: Box<i32> = Box::new(0);
        value.accept(Box::new(3i32)).unwrap();
        assert_eq!(*value, 3);
        assert_eq!(*Box::<i32>::parse_text("4").unwrap(), 4);
    }

    #[test]
    fn test_parse_document_by_representation() {
        assert_eq!(i64::parse_document(Document::from(7)).unwrap(), 7);
        assert!(i64::parse_document(Document::from("7")).is_err());
        assert_eq!(String::parse_document(Document::from("7")).unwrap(), "7");
        assert!(String::parse_document(Document::from(7)).is_err());
        assert_eq!(
            Duration::parse_document(Document::from(56)).unwrap(),
            Duration::from_nanos(56)
        );
        let url = Url::parse_document(Document::from("https://example.com")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_option_parse_document_null() {
        assert_eq!(Option::<i32>::parse_document(Document::Null).unwrap(), None);
        assert_eq!(Option::<i32>::parse_document(Document::from(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_field_set_text_through_blanket_impl() {
        let mut value: u32 = 0;
        let field: &mut dyn Field = &mut value;
        field.set_text("42").unwrap();
        assert_eq!(field.kind(), Kind::Integer);
        assert_eq!(value, 42);
    }
}
