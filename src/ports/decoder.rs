// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content decoder trait definition.
//!
//! This module defines the `ContentDecoder` trait, which turns a raw byte buffer (the
//! contents of a configuration file, for instance) into a target value. Decoders for JSON
//! and YAML live in the adapters layer; any closure with the right shape is a decoder too.

use crate::domain::Result;

/// Decodes raw content into a target.
///
/// # Examples
///
/// ```rust
/// use cfgbind::domain::{ConfigError, Result};
/// use cfgbind::ports::ContentDecoder;
///
/// struct PortDecoder;
///
/// impl ContentDecoder<u16> for PortDecoder {
///     fn decode(&self, content: &[u8], target: &mut u16) -> Result<()> {
///         let text = String::from_utf8_lossy(content);
///         *target = text.trim().parse().map_err(|e| ConfigError::ParseError {
///             message: format!("Invalid port: {}", e),
///             source: Some(Box::new(e)),
///         })?;
///         Ok(())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["port"]
///     }
/// }
///
/// let mut port = 0;
/// PortDecoder.decode(b"8080\n", &mut port).unwrap();
/// assert_eq!(port, 8080);
/// ```
pub trait ContentDecoder<T> {
    /// Decodes `content` into `target`.
    ///
    /// Implementations should leave values absent from `content` untouched, so decoded
    /// content layers over what earlier sources wrote.
    fn decode(&self, content: &[u8], target: &mut T) -> Result<()>;

    /// Returns the file extensions (without the leading dot) this decoder handles.
    fn supported_extensions(&self) -> &[&str] {
        &[]
    }
}

impl<T, F> ContentDecoder<T> for F
where
    F: Fn(&[u8], &mut T) -> Result<()>,
{
    fn decode(&self, content: &[u8], target: &mut T) -> Result<()> {
        self(content, target)
    }
}
