// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML content decoder.

use crate::adapters::json::overlay;
use crate::domain::{ConfigError, Result};
use crate::ports::{ContentDecoder, Record};

/// Decodes YAML content into a target.
///
/// Layers over the target the same way [`JsonDecoder`](crate::adapters::JsonDecoder) does.
/// An empty document changes nothing.
///
/// # Examples
///
/// ```rust
/// use cfgbind::adapters::YamlDecoder;
/// use cfgbind::bind_record;
/// use cfgbind::ports::ContentDecoder;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Database {
///     host: String,
///     port: u16,
/// }
///
/// bind_record!(Database { host, port });
///
/// let mut db = Database::default();
/// YamlDecoder::new().decode(b"host: localhost\nport: 5432\n", &mut db).unwrap();
/// assert_eq!(db.host, "localhost");
/// assert_eq!(db.port, 5432);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl YamlDecoder {
    /// Creates a new YAML decoder.
    pub fn new() -> Self {
        YamlDecoder
    }
}

impl<T: Record> ContentDecoder<T> for YamlDecoder {
    fn decode(&self, content: &[u8], target: &mut T) -> Result<()> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        let document: serde_json::Value =
            serde_yaml::from_slice(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;
        overlay(target, document)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Database {
        host: String,
        port: u16,
        replicas: Vec<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct App {
        name: String,
        database: Database,
        started: Option<DateTime<FixedOffset>>,
    }

    bind_record!(Database { host, port, replicas });
    bind_record!(App { name, database, started });

    #[test]
    fn test_yaml_decoder_nested() {
        let mut app = App::default();
        let yaml = r#"
name: demo
database:
  host: localhost
  port: 5432
  replicas:
    - a
    - b
"#;
        YamlDecoder.decode(yaml.as_bytes(), &mut app).unwrap();
        assert_eq!(app.name, "demo");
        assert_eq!(app.database.host, "localhost");
        assert_eq!(app.database.port, 5432);
        assert_eq!(app.database.replicas, vec!["a", "b"]);
    }

    #[test]
    fn test_yaml_decoder_layers_over_target() {
        let mut app = App {
            name: "kept".to_string(),
            ..App::default()
        };
        YamlDecoder
            .decode(b"database:\n  port: 1\n", &mut app)
            .unwrap();
        assert_eq!(app.name, "kept");
        assert_eq!(app.database.port, 1);
    }

    #[test]
    fn test_yaml_decoder_timestamp_text() {
        let mut app = App::default();
        YamlDecoder
            .decode(b"started: 2012-11-01T22:08:41+00:00\n", &mut app)
            .unwrap();
        assert_eq!(app.started.unwrap().timestamp(), 1_351_807_721);
    }

    #[test]
    fn test_yaml_decoder_empty_document() {
        let mut app = App {
            name: "kept".to_string(),
            ..App::default()
        };
        YamlDecoder.decode(b"", &mut app).unwrap();
        assert_eq!(app.name, "kept");
    }

    #[test]
    fn test_yaml_decoder_invalid() {
        let mut app = App::default();
        let err = YamlDecoder
            .decode(b"name: [unclosed", &mut app)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_yaml_decoder_extensions() {
        let extensions = ContentDecoder::<App>::supported_extensions(&YamlDecoder);
        assert_eq!(extensions, &["yaml", "yml"]);
    }
}
