// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path resolution.
//!
//! Walks a [`FieldPath`] through a target record and returns a handle to the addressed
//! field. Unset `Option` pointers to records are allocated when a path runs through them,
//! and an unset `Option` at the end of the path is allocated so the value has somewhere to
//! go. A pointer to a pointer is never allocated and resolves as not found.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::FieldPath;
use crate::ports::field::{Allocation, FieldMut, Record};

/// Resolves `path` against `target`.
///
/// # Errors
///
/// - `FieldNotFound` if a segment names no field, a segment runs through a non-record, the
///   path is empty, or the final field is a pointer to a pointer;
/// - `FieldNotSettable` if an unset pointer to a record that must be traversed is
///   read-only.
///
/// # Examples
///
/// ```
/// use cfgbind::bind_record;
/// use cfgbind::domain::{resolver, FieldPath};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Child {
///     name: String,
/// }
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Root {
///     child: Option<Box<Child>>,
/// }
///
/// bind_record!(Child { name });
/// bind_record!(Root { child });
///
/// let mut root = Root::default();
/// let field = resolver::resolve(&mut root, &FieldPath::from("child.name")).unwrap();
/// assert_eq!(field.name(), "name");
/// assert!(root.child.is_some());
/// ```
pub fn resolve<'a>(target: &'a mut dyn Record, path: &FieldPath) -> Result<FieldMut<'a>> {
    let mut segments = path.segments();
    let first = segments
        .next()
        .ok_or_else(|| ConfigError::not_found(path))?;
    let mut field = target
        .field_mut(first)
        .ok_or_else(|| ConfigError::not_found(path))?;

    for segment in segments {
        let settable = field.can_set();
        if field.is_zero() && !settable {
            if field.field().holds_record() {
                return Err(ConfigError::not_settable(path));
            }
            return Err(ConfigError::not_found(path));
        }
        let record = field
            .into_field()
            .record_mut()
            .ok_or_else(|| ConfigError::not_found(path))?;
        field = record
            .field_mut(segment)
            .ok_or_else(|| ConfigError::not_found(path))?
            .restrict(settable);
    }

    if field.can_set() {
        match field.field().allocate() {
            Allocation::Unsupported => return Err(ConfigError::not_found(path)),
            Allocation::Allocated => {
                tracing::trace!("Allocated pointer target for field '{}'", path);
            }
            Allocation::Present | Allocation::Deferred => {}
        }
    }

    Ok(field)
}
