// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path/value configuration source adapter.
//!
//! This module provides an adapter that writes explicit values to dotted field paths.

use crate::domain::{coercer, resolver, FieldPath, Result, Value};
use crate::ports::{ConfigSource, Record};

/// Configuration source adapter for path/value entries.
///
/// Entries are applied in the order they were supplied. A path that names no field is
/// skipped; any other failure stops the source at that entry.
///
/// Text values headed for non-string fields are parsed into the field's type. Typed values
/// must match the field's type exactly.
///
/// # Examples
///
/// ```rust
/// use cfgbind::adapters::DataAdapter;
/// use cfgbind::bind_record;
/// use cfgbind::ports::ConfigSource;
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
/// let adapter = DataAdapter::new([("host", "localhost"), ("port", "8080"), ("missing", "x")]);
///
/// let mut server = Server::default();
/// adapter.apply(&mut server).unwrap();
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataAdapter {
    entries: Vec<(FieldPath, Value)>,
}

impl DataAdapter {
    /// Creates an adapter from `(path, value)` entries.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldPath>,
        V: Into<Value>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, value)| (path.into(), value.into()))
                .collect(),
        }
    }

    /// Appends an entry, applied after the existing ones.
    pub fn with_entry(mut self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Self {
        self.entries.push((path.into(), value.into()));
        self
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the adapter has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Record> ConfigSource<T> for DataAdapter {
    fn name(&self) -> &str {
        "data"
    }

    fn apply(&self, target: &mut T) -> Result<()> {
        for (path, value) in &self.entries {
            let mut field = match resolver::resolve(&mut *target, path) {
                Ok(field) => field,
                Err(e) if e.is_not_found() => {
                    tracing::debug!("Skipping unknown field '{}'", path);
                    continue;
                }
                Err(e) => return Err(e),
            };
            coercer::assign(&mut field, path, value)?;
        }
        Ok(())
    }
}
