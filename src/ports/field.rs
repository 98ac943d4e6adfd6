// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field descriptor traits.
//!
//! Rust has no runtime reflection, so a target type describes its own shape: a `Record`
//! hands out `FieldMut` handles by field name, and every field value is a `Field` trait
//! object that knows its kind, how to allocate itself when it is an unset pointer, and how
//! to accept typed or text values.
//!
//! `Record` is normally generated with [`bind_record!`](crate::bind_record), and `Field`
//! is implemented for every [`Setting`](crate::domain::Setting) type.

use crate::domain::errors::BoxError;
use std::any::Any;
use std::fmt;

/// The declared kind of a field, used to pick a coercion route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
    /// `String`; text is assigned verbatim.
    String,
    /// `bool`.
    Bool,
    /// Signed or unsigned integers.
    Integer,
    /// Floating point numbers.
    Float,
    /// `std::time::Duration`.
    Duration,
    /// RFC 3339 timestamps.
    Timestamp,
    /// URLs.
    Url,
    /// Types that parse themselves from text.
    Text,
    /// Types decoded from structured data (JSON).
    Data,
    /// A nested record with addressable fields.
    Record,
    /// A single level of optional indirection (`Option<T>`).
    Pointer,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Duration => "duration",
            Kind::Timestamp => "timestamp",
            Kind::Url => "url",
            Kind::Text => "text",
            Kind::Data => "data",
            Kind::Record => "record",
            Kind::Pointer => "pointer",
        };
        f.write_str(name)
    }
}

/// Outcome of asking a field to materialize itself before assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allocation {
    /// Not a pointer, or a pointer already holding a value.
    Present,
    /// An unset pointer was given a fresh zero-valued pointee.
    Allocated,
    /// An unset pointer whose pointee has no zero value; it is filled on assignment.
    Deferred,
    /// A pointer to a pointer, which cannot be bound.
    Unsupported,
}

/// An addressable, assignable field value.
pub trait Field {
    /// Returns the declared kind.
    fn kind(&self) -> Kind;

    /// Returns the Rust type name of the field.
    fn type_name(&self) -> &'static str;

    /// Returns `true` for a pointer that holds no value.
    fn is_zero(&self) -> bool;

    /// Allocates the pointee of an unset pointer.
    fn allocate(&mut self) -> Allocation;

    /// Returns the nested record, allocating an unset pointer-to-record on the way.
    ///
    /// Returns `None` without mutating anything when the field is not a record.
    fn record_mut(&mut self) -> Option<&mut dyn Record>;

    /// Returns `true` for records and for pointers to records, without allocating.
    fn holds_record(&self) -> bool;

    /// Assigns a typed value, handing it back when its type does not fit.
    fn set_value(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

    /// Parses text according to the field type and assigns the result.
    fn set_text(&mut self, text: &str) -> Result<(), BoxError>;

    /// Decodes a node of a structured document and assigns the result.
    fn set_document(&mut self, document: serde_json::Value) -> Result<(), BoxError>;
}

/// A struct whose fields can be addressed by name.
///
/// # Examples
///
/// ```
/// use cfgbind::bind_record;
/// use cfgbind::ports::Record;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// bind_record!(Server { host, port });
///
/// let mut server = Server::default();
/// assert!(server.field_mut("port").is_some());
/// assert!(server.field_mut("missing").is_none());
/// assert_eq!(server.field_names(), &["host", "port"]);
/// ```
pub trait Record {
    /// Returns the addressable field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Returns a handle to the named field.
    fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>>;
}

/// A transient handle to one field of a record.
pub struct FieldMut<'a> {
    name: &'static str,
    settable: bool,
    field: &'a mut dyn Field,
}

impl<'a> FieldMut<'a> {
    /// Creates a handle.
    pub fn new(name: &'static str, field: &'a mut dyn Field, settable: bool) -> Self {
        Self {
            name,
            settable,
            field,
        }
    }

    /// Returns the registered name of the field.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `false` for fields registered read-only, or reached through one.
    pub fn can_set(&self) -> bool {
        self.settable
    }

    /// Returns the declared kind.
    pub fn kind(&self) -> Kind {
        self.field.kind()
    }

    /// Returns the Rust type name of the field.
    pub fn type_name(&self) -> &'static str {
        self.field.type_name()
    }

    /// Returns `true` for a pointer that holds no value.
    pub fn is_zero(&self) -> bool {
        self.field.is_zero()
    }

    pub(crate) fn field(&mut self) -> &mut dyn Field {
        &mut *self.field
    }

    pub(crate) fn into_field(self) -> &'a mut dyn Field {
        self.field
    }

    pub(crate) fn restrict(mut self, settable: bool) -> Self {
        self.settable &= settable;
        self
    }
}

impl fmt::Debug for FieldMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMut")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("type_name", &self.type_name())
            .field("settable", &self.settable)
            .finish()
    }
}
