// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source constructors.
//!
//! Shorthands returning boxed sources, ready to hand to [`Config::new`](crate::service::Config::new)
//! or [`Config::extend`](crate::service::Config::extend).

use crate::adapters::{ContentAdapter, DataAdapter, FileAdapter};
use crate::domain::{FieldPath, Value};
use crate::ports::{BoxedSource, ContentDecoder, Record};
use std::path::Path;

/// Raw content decoded as JSON over the whole target.
pub fn with_content<T>(content: impl Into<Vec<u8>>) -> BoxedSource<T>
where
    T: Record + 'static,
{
    Box::new(ContentAdapter::new(content))
}

/// Raw content decoded with `decoder`.
pub fn with_content_using<T, D>(content: impl Into<Vec<u8>>, decoder: D) -> BoxedSource<T>
where
    T: 'static,
    D: ContentDecoder<T> + 'static,
{
    Box::new(ContentAdapter::with_decoder(content, decoder))
}

/// A configuration file, decoded according to its extension.
///
/// The file is read when the source is applied.
pub fn with_file<T>(path: impl AsRef<Path>) -> BoxedSource<T>
where
    T: Record + 'static,
{
    Box::new(FileAdapter::new(path))
}

/// A configuration file decoded with `decoder`.
pub fn with_file_using<T, D>(path: impl AsRef<Path>, decoder: D) -> BoxedSource<T>
where
    T: 'static,
    D: ContentDecoder<T> + 'static,
{
    Box::new(FileAdapter::with_decoder(path, decoder))
}

/// `(path, value)` entries. Paths naming no field are skipped.
///
/// # Examples
///
/// ```rust
/// use cfgbind::prelude::*;
/// use serde::Deserialize;
/// use std::time::Duration;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Client {
///     retries: u8,
///     timeout: Duration,
/// }
///
/// bind_record!(Client { retries, timeout });
///
/// # fn main() -> Result<()> {
/// let mut client = Client::default();
/// Config::new(
///     &mut client,
///     [
///         with_data([("retries", "3")]),
///         with_data([("timeout", Duration::from_secs(5))]),
///     ],
/// )?;
/// assert_eq!(client.retries, 3);
/// assert_eq!(client.timeout, Duration::from_secs(5));
/// # Ok(())
/// # }
/// ```
pub fn with_data<T, I, K, V>(entries: I) -> BoxedSource<T>
where
    T: Record + 'static,
    I: IntoIterator<Item = (K, V)>,
    K: Into<FieldPath>,
    V: Into<Value>,
{
    Box::new(DataAdapter::new(entries))
}

/// `(path, variable name)` entries read from the process environment.
///
/// Unset and empty variables are skipped, as are paths naming no field.
#[cfg(feature = "env")]
pub fn with_environment<T, I, K, V>(entries: I) -> BoxedSource<T>
where
    T: Record + 'static,
    I: IntoIterator<Item = (K, V)>,
    K: Into<FieldPath>,
    V: Into<String>,
{
    Box::new(crate::adapters::EnvironmentAdapter::new(entries))
}
