// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value coercion.
//!
//! Assigns source values to resolved fields. Text headed for a non-string field is parsed
//! according to the field type's [`Setting`](crate::domain::Setting) strategy; anything
//! else must already have the field's exact type.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::{FieldPath, Value};
use crate::ports::field::{FieldMut, Kind};

/// Assigns `value` to `field`.
///
/// Text values are routed through [`assign_text`] unless the field is a plain string;
/// every other value is assigned directly.
///
/// # Errors
///
/// - `FieldNotSettable` for read-only fields;
/// - `TypeConversionError` when text does not parse into the field type;
/// - `TypeMismatch` when a typed value has a different type than the field.
pub fn assign(field: &mut FieldMut<'_>, path: &FieldPath, value: &Value) -> Result<()> {
    match value {
        Value::Text(text) if field.kind() != Kind::String => assign_text(field, path, text),
        _ => assign_value(field, path, value),
    }
}

/// Parses `text` into the field's type and assigns it.
///
/// Strings take the text verbatim. `Option` fields parse the text as their pointee.
///
/// # Examples
///
/// ```
/// use cfgbind::bind_record;
/// use cfgbind::domain::{coercer, resolver, FieldPath};
/// use serde::Deserialize;
/// use std::time::Duration;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Timeouts {
///     read: Duration,
/// }
///
/// bind_record!(Timeouts { read });
///
/// let mut timeouts = Timeouts::default();
/// let path = FieldPath::from("read");
/// let mut field = resolver::resolve(&mut timeouts, &path).unwrap();
/// coercer::assign_text(&mut field, &path, "56").unwrap();
/// assert_eq!(timeouts.read, Duration::from_nanos(56));
/// ```
pub fn assign_text(field: &mut FieldMut<'_>, path: &FieldPath, text: &str) -> Result<()> {
    if field.kind() == Kind::String {
        return assign_value(field, path, &Value::text(text));
    }
    if !field.can_set() {
        return Err(ConfigError::not_settable(path));
    }

    let target_type = field.type_name();
    field
        .field()
        .set_text(text)
        .map_err(|source| ConfigError::TypeConversionError {
            key: path.to_string(),
            target_type: target_type.to_string(),
            source,
        })?;

    tracing::trace!("Assigned text to field '{}' ({})", path, target_type);
    Ok(())
}

fn assign_value(field: &mut FieldMut<'_>, path: &FieldPath, value: &Value) -> Result<()> {
    if !field.can_set() {
        return Err(ConfigError::not_settable(path));
    }

    let expected = field.type_name();
    field
        .field()
        .set_value(value.to_any())
        .map_err(|_| ConfigError::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            found: value.type_name().to_string(),
        })?;

    tracing::trace!("Assigned {} to field '{}'", value.type_name(), path);
    Ok(())
}
