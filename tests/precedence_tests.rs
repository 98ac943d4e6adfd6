// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for source ordering.
//!
//! Sources apply in the order they are given, so the last source to write a field wins.

use cfgbind::prelude::*;
use serde::Deserialize;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to set and clean up environment variables
struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Database {
    host: String,
    port: u16,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct AppConfig {
    name: String,
    level: String,
    database: Option<Database>,
}

bind_record! {
    Database {
        "Host" => host,
        "Port" => port,
    }
}

bind_record! {
    AppConfig {
        "Name" => name,
        "Level" => level,
        "Database" => database,
    }
}

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
#[cfg(all(feature = "env", feature = "yaml"))]
fn test_precedence_env_after_yaml() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("CFGBIND_PREC_LEVEL", "env_value");

    let file = yaml_file("Name: yaml_name\nLevel: yaml_value\n");

    let mut app = AppConfig::default();
    Config::builder(&mut app)
        .with_file(file.path())
        .with_environment([("Level", "CFGBIND_PREC_LEVEL")])
        .build()
        .unwrap();

    assert_eq!(app.level, "env_value");
    assert_eq!(app.name, "yaml_name");
}

#[test]
#[cfg(all(feature = "env", feature = "yaml"))]
fn test_precedence_yaml_after_env() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("CFGBIND_PREC_LEVEL_2", "env_value");

    let file = yaml_file("Level: yaml_value\n");

    let mut app = AppConfig::default();
    Config::builder(&mut app)
        .with_environment([("Level", "CFGBIND_PREC_LEVEL_2")])
        .with_file(file.path())
        .build()
        .unwrap();

    assert_eq!(app.level, "yaml_value");
}

#[test]
fn test_precedence_data_over_content() {
    let mut app = AppConfig::default();
    Config::new(
        &mut app,
        [
            with_content(r#"{"Name": "content", "Database": {"Host": "db", "Port": 1}}"#),
            with_data([("Database.Port", "5432")]),
        ],
    )
    .unwrap();

    let database = app.database.unwrap();
    assert_eq!(app.name, "content");
    assert_eq!(database.host, "db");
    assert_eq!(database.port, 5432);
}

#[test]
fn test_precedence_content_layers_over_data() {
    let mut app = AppConfig::default();
    Config::new(
        &mut app,
        [
            with_data([("Name", "data"), ("Database.Host", "db")]),
            with_content(r#"{"Database": {"Port": 1}}"#),
        ],
    )
    .unwrap();

    let database = app.database.unwrap();
    assert_eq!(app.name, "data");
    assert_eq!(database.host, "db");
    assert_eq!(database.port, 1);
}

#[test]
fn test_precedence_extend_overrides() {
    let mut app = AppConfig::default();
    let mut config = Config::new(&mut app, [with_data([("Level", "info")])]).unwrap();

    config.extend([with_data([("Level", "debug")])]).unwrap();
    config.extend([with_data([("Level", "trace")])]).unwrap();

    assert_eq!(config.applied().len(), 3);
    assert_eq!(app.level, "trace");
}

#[test]
fn test_precedence_skipped_entry_keeps_earlier_value() {
    let mut app = AppConfig::default();
    Config::new(
        &mut app,
        [
            with_data([("Level", "info")]),
            with_data([("Levle", "debug")]),
        ],
    )
    .unwrap();

    assert_eq!(app.level, "info");
}

#[test]
fn test_precedence_failure_keeps_earlier_writes() {
    let mut app = AppConfig::default();
    let err = Config::new(
        &mut app,
        [
            with_data([("Level", "info")]),
            with_data([("Database.Port", "not a port")]),
            with_data([("Level", "never")]),
        ],
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::TypeConversionError { .. }));
    assert_eq!(app.level, "info");
    assert_eq!(app.database.unwrap().port, 0);
}

#[test]
fn test_reapplying_sources_is_idempotent() {
    let sources = || {
        [
            with_content(r#"{"Name": "content"}"#),
            with_data([("Level", "warn"), ("Database.Host", "db")]),
        ]
    };

    let mut first = AppConfig::default();
    Config::new(&mut first, sources()).unwrap();

    let mut second = AppConfig::default();
    let mut config = Config::new(&mut second, sources()).unwrap();
    config.extend(sources()).unwrap();

    assert_eq!(first.name, second.name);
    assert_eq!(first.level, second.level);
    assert_eq!(
        first.database.unwrap().host,
        second.database.unwrap().host
    );
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Tuning {
    name: String,
    ratio: f64,
    #[serde(skip)]
    secret: String,
}

bind_record! {
    Tuning {
        "Name" => name,
        "Ratio" => ratio,
        "Secret" => secret,
    }
}

#[test]
fn test_content_keeps_values_it_does_not_mention() {
    let mut tuning = Tuning {
        ratio: f64::NAN,
        ..Tuning::default()
    };
    Config::new(
        &mut tuning,
        [
            with_data([("Secret", "s3cr3t")]),
            with_content(r#"{"Name": "x"}"#),
        ],
    )
    .unwrap();

    assert_eq!(tuning.name, "x");
    assert_eq!(tuning.secret, "s3cr3t");
    assert!(tuning.ratio.is_nan());
}
