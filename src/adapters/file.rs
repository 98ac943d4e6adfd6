// SPDX-License-Identifier: MIT OR Apache-2.0

//! File configuration source adapter.
//!
//! This module provides an adapter that reads a configuration file and hands its bytes to a
//! [`ContentAdapter`]. The decoder is picked from the file extension unless one is given.

use crate::adapters::content::ContentAdapter;
use crate::adapters::json::JsonDecoder;
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigSource, ContentDecoder, Record};
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration source adapter for files.
///
/// The file is read each time the source is applied, so a session built from the same
/// adapter twice picks up edits made in between.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgbind::adapters::FileAdapter;
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
/// FileAdapter::<Settings>::new("/etc/myapp/config.yaml")
///     .apply(&mut settings)
///     .unwrap();
/// ```
pub struct FileAdapter<T> {
    file_path: PathBuf,
    decoder: Arc<dyn ContentDecoder<T>>,
}

impl<T> FileAdapter<T> {
    /// Creates an adapter for `path`, choosing the decoder from its extension.
    ///
    /// `.yaml` and `.yml` files use [`YamlDecoder`](crate::adapters::YamlDecoder) when the
    /// `yaml` feature is enabled. Everything else is decoded as JSON.
    pub fn new(path: impl AsRef<Path>) -> Self
    where
        T: Record + 'static,
    {
        let file_path = path.as_ref().to_path_buf();
        let decoder = decoder_for(&file_path);
        Self { file_path, decoder }
    }

    /// Creates an adapter for `path` that decodes with `decoder`.
    pub fn with_decoder<D>(path: impl AsRef<Path>, decoder: D) -> Self
    where
        D: ContentDecoder<T> + 'static,
    {
        Self {
            file_path: path.as_ref().to_path_buf(),
            decoder: Arc::new(decoder),
        }
    }

    /// Creates an adapter for `filename` in the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    /// * `filename` - The configuration file name (e.g., "config.yaml")
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when no home directory can be determined. A missing file is
    /// only reported once the source is applied.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cfgbind::adapters::FileAdapter;
    /// # #[derive(Default, serde::Deserialize)]
    /// # struct Settings { name: String }
    /// # cfgbind::bind_record!(Settings { name });
    ///
    /// let adapter =
    ///     FileAdapter::<Settings>::from_default_location("myapp", "com.example", "config.yaml")
    ///         .unwrap();
    /// ```
    pub fn from_default_location(app_name: &str, qualifier: &str, filename: &str) -> Result<Self>
    where
        T: Record + 'static,
    {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "file".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(Self::new(proj_dirs.config_dir().join(filename)))
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read(&self) -> Result<Vec<u8>> {
        let io_error = |source| ConfigError::IoError {
            path: self.file_path.display().to_string(),
            source,
        };

        let canonical_path = self.file_path.canonicalize().map_err(io_error)?;
        tracing::debug!("Reading configuration file {}", canonical_path.display());
        fs::read(&canonical_path).map_err(io_error)
    }
}

fn decoder_for<T>(path: &Path) -> Arc<dyn ContentDecoder<T>>
where
    T: Record + 'static,
{
    #[cfg(feature = "yaml")]
    {
        let yaml = crate::adapters::yaml::YamlDecoder::new();
        let matches = path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
            ContentDecoder::<T>::supported_extensions(&yaml)
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        });
        if matches {
            return Arc::new(yaml);
        }
    }
    #[cfg(not(feature = "yaml"))]
    let _ = path;

    Arc::new(JsonDecoder::new())
}

impl<T> fmt::Debug for FileAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAdapter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl<T> ConfigSource<T> for FileAdapter<T> {
    fn name(&self) -> &str {
        "file"
    }

    fn apply(&self, target: &mut T) -> Result<()> {
        let content = self.read()?;
        ContentAdapter::with_shared_decoder(content, Arc::clone(&self.decoder)).apply(target)
    }
}
