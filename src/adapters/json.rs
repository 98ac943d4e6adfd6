// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON content decoder.
//!
//! This module provides the default decoder for raw configuration content, and the overlay
//! step shared by the document decoders: the decoded document is written into the target
//! field by field instead of replacing it.

use crate::domain::{ConfigError, Result};
use crate::ports::{ContentDecoder, FieldMut, Kind, Record};
use serde_json::{Map, Value as Document};

/// Decodes JSON content into a target.
///
/// Keys present in the document overwrite the target's values, nested objects merge key by
/// key, and everything absent from the document keeps its current value.
///
/// # Examples
///
/// ```rust
/// use cfgbind::adapters::JsonDecoder;
/// use cfgbind::bind_record;
/// use cfgbind::ports::ContentDecoder;
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
/// let mut server = Server { host: "localhost".to_string(), port: 80 };
/// JsonDecoder::new().decode(br#"{"port": 8080}"#, &mut server).unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Creates a new JSON decoder.
    pub fn new() -> Self {
        JsonDecoder
    }
}

impl<T: Record> ContentDecoder<T> for JsonDecoder {
    fn decode(&self, content: &[u8], target: &mut T) -> Result<()> {
        let document: Document =
            serde_json::from_slice(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;
        overlay(target, document)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Writes `document` into `target`, leaving everything it does not mention untouched.
///
/// Object keys are matched against the record's field names, exactly first and then
/// ignoring ASCII case. Objects under a record field (or an `Option` of one) descend into
/// it, allocating an unset pointer; every other node replaces the field's value. `null`
/// clears pointers and leaves other fields alone. Keys naming no field and read-only
/// fields are skipped.
///
/// # Errors
///
/// `ParseError` if the document is not an object, or a node does not decode into its
/// field's type. Fields written before the failure keep their new values.
pub fn overlay(target: &mut dyn Record, document: Document) -> Result<()> {
    match document {
        Document::Null => Ok(()),
        Document::Object(object) => overlay_object(target, object, ""),
        other => Err(ConfigError::ParseError {
            message: format!("Expected a mapping at the top level, found {}", other),
            source: None,
        }),
    }
}

fn overlay_object(
    record: &mut dyn Record,
    object: Map<String, Document>,
    prefix: &str,
) -> Result<()> {
    for (key, node) in object {
        let Some(mut field) = field_by_key(record, &key) else {
            tracing::trace!("Ignoring unknown key '{}{}'", prefix, key);
            continue;
        };
        let path = if prefix.is_empty() {
            field.name().to_string()
        } else {
            format!("{}{}", prefix, field.name())
        };
        if !field.can_set() {
            tracing::debug!("Skipping read-only field '{}'", path);
            continue;
        }
        if node.is_null() && field.kind() != Kind::Pointer {
            continue;
        }

        if node.is_object() {
            if let Some(nested) = field.field().record_mut() {
                if let Document::Object(object) = node {
                    overlay_object(nested, object, &format!("{}.", path))?;
                }
                continue;
            }
        }
        overlay_leaf(&mut field, &path, node)?;
    }
    Ok(())
}

fn overlay_leaf(field: &mut FieldMut<'_>, path: &str, node: Document) -> Result<()> {
    let target_type = field.type_name();
    field.field().set_document(node).map_err(|e| ConfigError::ParseError {
        message: format!("Failed to decode field '{}' as {}: {}", path, target_type, e),
        source: Some(e),
    })?;
    tracing::trace!("Decoded field '{}' ({})", path, target_type);
    Ok(())
}

fn field_by_key<'a>(record: &'a mut dyn Record, key: &str) -> Option<FieldMut<'a>> {
    let names = record.field_names();
    let name = names
        .iter()
        .find(|name| **name == key)
        .or_else(|| names.iter().find(|name| name.eq_ignore_ascii_case(key)))?;
    record.field_mut(name)
}
