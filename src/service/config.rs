// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding session.
//!
//! This module provides [`Config`], which applies configuration sources to a borrowed
//! target in order, and [`ConfigBuilder`] for assembling the source list fluently.

use crate::domain::{coercer, resolver, FieldPath, Result, Value};
use crate::options;
use crate::ports::{BoxedSource, ConfigSource, ContentDecoder, FieldMut, Record};
use std::path::Path;

/// A binding session over a mutable target.
///
/// Sources run strictly in the order they are supplied, so later sources override what
/// earlier ones wrote. The first failing source stops the session; the target keeps every
/// write made before the failure.
///
/// # Examples
///
/// ```rust
/// use cfgbind::prelude::*;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default, rename_all = "PascalCase")]
/// struct AppConfig {
///     name: String,
///     port: u16,
/// }
///
/// bind_record! {
///     AppConfig {
///         "Name" => name,
///         "Port" => port,
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let mut app = AppConfig::default();
/// let mut config = Config::new(
///     &mut app,
///     [
///         with_content(r#"{"Name": "demo", "Port": 80}"#),
///         with_data([("Port", "8080")]),
///     ],
/// )?;
/// config.set("Name", "override")?;
/// assert_eq!(config.applied(), ["content", "data"]);
///
/// let app = config.into_inner();
/// assert_eq!(app.name, "override");
/// assert_eq!(app.port, 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Config<'a, T> {
    target: &'a mut T,
    applied: Vec<String>,
}

impl<'a, T> Config<'a, T> {
    /// Creates a session around `target` and applies `sources` in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a source. Sources after it are not applied.
    pub fn new<I>(target: &'a mut T, sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = BoxedSource<T>>,
    {
        let mut config = Self {
            target,
            applied: Vec::new(),
        };
        config.extend(sources)?;
        Ok(config)
    }

    /// Returns a builder for a session around `target`.
    pub fn builder(target: &'a mut T) -> ConfigBuilder<'a, T> {
        ConfigBuilder::new(target)
    }

    /// Applies more sources to the target, after everything applied so far.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a source. Sources after it are not applied.
    pub fn extend<I>(&mut self, sources: I) -> Result<()>
    where
        I: IntoIterator<Item = BoxedSource<T>>,
    {
        for source in sources {
            self.apply(source.as_ref())?;
        }
        Ok(())
    }

    /// Applies a single source to the target.
    pub fn apply(&mut self, source: &dyn ConfigSource<T>) -> Result<()> {
        tracing::debug!("Applying configuration source '{}'", source.name());
        source.apply(&mut *self.target)?;
        self.applied.push(source.name().to_string());
        Ok(())
    }

    /// Returns the names of the sources applied so far, in order.
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Returns the target.
    pub fn target(&self) -> &T {
        &*self.target
    }

    /// Returns the target mutably.
    pub fn target_mut(&mut self) -> &mut T {
        &mut *self.target
    }

    /// Ends the session and returns the target borrow.
    pub fn into_inner(self) -> &'a mut T {
        self.target
    }
}

impl<'a, T: Record> Config<'a, T> {
    /// Resolves `path` against the target.
    ///
    /// Unlike the path-based sources, a path that names no field is an error here.
    ///
    /// # Errors
    ///
    /// - `FieldNotFound` if the path names no field;
    /// - `FieldNotSettable` if the path runs through an unset read-only pointer.
    pub fn field(&mut self, path: impl Into<FieldPath>) -> Result<FieldMut<'_>> {
        resolver::resolve(&mut *self.target, &path.into())
    }

    /// Resolves `path` and assigns `value` to it.
    ///
    /// Text is parsed when the field is not a string, as it is for data sources.
    ///
    /// # Errors
    ///
    /// Everything [`Config::field`] returns, plus the assignment errors of
    /// [`coercer::assign`].
    pub fn set(&mut self, path: impl Into<FieldPath>, value: impl Into<Value>) -> Result<()> {
        let path = path.into();
        let mut field = resolver::resolve(&mut *self.target, &path)?;
        coercer::assign(&mut field, &path, &value.into())
    }
}

/// Builder for [`Config`].
///
/// Collects sources and applies them, in the order they were added, on
/// [`build`](ConfigBuilder::build).
///
/// # Examples
///
/// ```rust
/// use cfgbind::prelude::*;
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
/// # fn main() -> Result<()> {
/// let mut server = Server::default();
/// let config = Config::builder(&mut server)
///     .with_data([("host", "localhost"), ("port", "80")])
///     .with_data([("port", "8080")])
///     .build()?;
/// assert_eq!(config.target().port, 8080);
/// # Ok(())
/// # }
/// ```
pub struct ConfigBuilder<'a, T> {
    target: &'a mut T,
    sources: Vec<BoxedSource<T>>,
}

impl<'a, T> ConfigBuilder<'a, T> {
    /// Creates a builder for a session around `target`.
    pub fn new(target: &'a mut T) -> Self {
        Self {
            target,
            sources: Vec::new(),
        }
    }

    /// Adds a configuration source.
    pub fn with_source(mut self, source: BoxedSource<T>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds raw content decoded as JSON.
    pub fn with_content(self, content: impl Into<Vec<u8>>) -> Self
    where
        T: Record + 'static,
    {
        self.with_source(options::with_content(content))
    }

    /// Adds raw content decoded with `decoder`.
    pub fn with_content_using<D>(self, content: impl Into<Vec<u8>>, decoder: D) -> Self
    where
        T: 'static,
        D: ContentDecoder<T> + 'static,
    {
        self.with_source(options::with_content_using(content, decoder))
    }

    /// Adds a configuration file, decoded according to its extension.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self
    where
        T: Record + 'static,
    {
        self.with_source(options::with_file(path))
    }

    /// Adds a configuration file decoded with `decoder`.
    pub fn with_file_using<D>(self, path: impl AsRef<Path>, decoder: D) -> Self
    where
        T: 'static,
        D: ContentDecoder<T> + 'static,
    {
        self.with_source(options::with_file_using(path, decoder))
    }

    /// Adds `(path, value)` entries.
    pub fn with_data<I, K, V>(self, entries: I) -> Self
    where
        T: Record + 'static,
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldPath>,
        V: Into<Value>,
    {
        self.with_source(options::with_data(entries))
    }

    /// Adds `(path, variable name)` entries read from the process environment.
    #[cfg(feature = "env")]
    pub fn with_environment<I, K, V>(self, entries: I) -> Self
    where
        T: Record + 'static,
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldPath>,
        V: Into<String>,
    {
        self.with_source(options::with_environment(entries))
    }

    /// Applies the collected sources and returns the session.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a source.
    pub fn build(self) -> Result<Config<'a, T>> {
        Config::new(self.target, self.sources)
    }
}
