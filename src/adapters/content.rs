// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw content configuration source adapter.
//!
//! This module provides an adapter that decodes an in-memory byte buffer whose shape
//! matches the whole target, such as the contents of a configuration file.

use crate::adapters::json::JsonDecoder;
use crate::domain::Result;
use crate::ports::{ConfigSource, ContentDecoder, Record};
use std::fmt;
use std::sync::Arc;

/// Configuration source adapter for raw content.
///
/// No path resolution happens here: the decoder writes the whole document into the target.
/// The default decoder is [`JsonDecoder`].
///
/// # Examples
///
/// ```rust
/// use cfgbind::adapters::ContentAdapter;
/// use cfgbind::bind_record;
/// use cfgbind::ports::ConfigSource;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Settings {
///     name: String,
/// }
///
/// bind_record!(Settings { name });
///
/// let mut settings = Settings::default();
/// let adapter = ContentAdapter::<Settings>::new(r#"{"name": "demo"}"#);
/// adapter.apply(&mut settings).unwrap();
/// assert_eq!(settings.name, "demo");
/// ```
pub struct ContentAdapter<T> {
    content: Vec<u8>,
    decoder: Arc<dyn ContentDecoder<T>>,
}

impl<T> ContentAdapter<T> {
    /// Creates an adapter decoding `content` as JSON.
    pub fn new(content: impl Into<Vec<u8>>) -> Self
    where
        T: Record + 'static,
    {
        Self::with_decoder(content, JsonDecoder::new())
    }

    /// Creates an adapter decoding `content` with `decoder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgbind::adapters::ContentAdapter;
    /// use cfgbind::domain::Result;
    /// use cfgbind::ports::ConfigSource;
    ///
    /// let adapter = ContentAdapter::with_decoder("abc", |content: &[u8], len: &mut usize| -> Result<()> {
    ///     *len = content.len();
    ///     Ok(())
    /// });
    ///
    /// let mut len = 0usize;
    /// adapter.apply(&mut len).unwrap();
    /// assert_eq!(len, 3);
    /// ```
    pub fn with_decoder<D>(content: impl Into<Vec<u8>>, decoder: D) -> Self
    where
        D: ContentDecoder<T> + 'static,
    {
        Self::with_shared_decoder(content, Arc::new(decoder))
    }

    pub(crate) fn with_shared_decoder(
        content: impl Into<Vec<u8>>,
        decoder: Arc<dyn ContentDecoder<T>>,
    ) -> Self {
        Self {
            content: content.into(),
            decoder,
        }
    }

    /// Returns the raw content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl<T> fmt::Debug for ContentAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentAdapter")
            .field("content_len", &self.content.len())
            .finish_non_exhaustive()
    }
}

impl<T> ConfigSource<T> for ContentAdapter<T> {
    fn name(&self) -> &str {
        "content"
    }

    fn apply(&self, target: &mut T) -> Result<()> {
        tracing::debug!("Decoding {} bytes of configuration content", self.content.len());
        self.decoder.decode(&self.content, target)
    }
}
