// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture configuration binding crate.
//!
//! This crate writes configuration into an existing, typed target. Sources (raw content,
//! files, path/value maps and environment variables) are applied in order; path-based
//! sources resolve dotted field paths such as `Child.Name` against the target and coerce
//! their values into each field's declared type.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Paths, values, errors, and the resolver and coercer at the core
//! - **Ports**: Trait definitions that define interfaces (`ConfigSource`, `ContentDecoder`,
//!   `Record`, `Field`)
//! - **Adapters**: Implementations for specific configuration sources and content formats
//! - **Service**: The binding session that applies sources to a target
//!
//! # Binding
//!
//! Every source addresses fields by name, which the [`bind_record!`] macro provides.
//! Fields may be plain values, `Option`s (allocated on demand), boxes, or other bound
//! records. Text values are parsed according to the field type: RFC 3339 for
//! timestamps, integer nanoseconds for durations, URL parsing for URLs,
//! [`FromText`](domain::FromText) for types registered with [`text_setting!`], and JSON
//! for everything else.
//!
//! Content and file sources decode a whole document and write it field by field over the
//! target's current values. Keys the document leaves out keep their values.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML content decoding (default)
//! - `env`: Enable environment variable sources (default)
//!
//! # Quick Start
//!
//! ```rust
//! use cfgbind::prelude::*;
//! use serde::Deserialize;
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default, rename_all = "PascalCase")]
//! struct Database {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default, rename_all = "PascalCase")]
//! struct AppConfig {
//!     name: String,
//!     timeout: Duration,
//!     database: Option<Database>,
//! }
//!
//! bind_record! {
//!     Database {
//!         "Host" => host,
//!         "Port" => port,
//!     }
//! }
//!
//! bind_record! {
//!     AppConfig {
//!         "Name" => name,
//!         "Timeout" => timeout,
//!         "Database" => database,
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let env = HashMap::from([("DB_PORT".to_string(), "5432".to_string())]);
//!
//! let mut app = AppConfig::default();
//! Config::builder(&mut app)
//!     .with_content(r#"{"Name": "demo"}"#)
//!     .with_data([("Database.Host", "localhost")])
//!     .with_data([("Timeout", Duration::from_secs(30))])
//!     .with_source(Box::new(
//!         EnvironmentAdapter::new([("Database.Port", "DB_PORT")]).with_values(env),
//!     ))
//!     .build()?;
//!
//! let database = app.database.as_ref().unwrap();
//! assert_eq!(app.name, "demo");
//! assert_eq!(app.timeout, Duration::from_secs(30));
//! assert_eq!(database.host, "localhost");
//! assert_eq!(database.port, 5432);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

pub mod adapters;
pub mod domain;
pub mod options;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{ConfigError, FieldPath, FromText, Result, Setting, Value};
    pub use crate::options::{
        with_content, with_content_using, with_data, with_file, with_file_using,
    };
    pub use crate::ports::{BoxedSource, ConfigSource, ContentDecoder, FieldMut, Kind, Record};
    pub use crate::service::{Config, ConfigBuilder};
    pub use crate::{bind_record, data_setting, text_setting};

    pub use crate::adapters::{ContentAdapter, DataAdapter, FileAdapter, JsonDecoder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvironmentAdapter;
    #[cfg(feature = "env")]
    pub use crate::options::with_environment;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlDecoder;
}
