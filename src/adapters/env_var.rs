// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides an adapter that binds named environment variables to field paths.

use crate::domain::{coercer, resolver, FieldPath, Result};
use crate::ports::{ConfigSource, Record};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Configuration source adapter for environment variables.
///
/// Each entry maps a field path to the name of the variable holding its value. Variables
/// that are unset or empty leave the field alone, as do paths that name no field. Values
/// are parsed into the field's type.
///
/// # Examples
///
/// ```rust
/// use cfgbind::adapters::EnvironmentAdapter;
/// use cfgbind::bind_record;
/// use cfgbind::ports::ConfigSource;
/// use serde::Deserialize;
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Server {
///     port: u16,
/// }
///
/// bind_record!(Server { port });
///
/// let values = HashMap::from([("APP_PORT".to_string(), "8080".to_string())]);
/// let adapter = EnvironmentAdapter::new([("port", "APP_PORT")]).with_values(values);
///
/// let mut server = Server::default();
/// adapter.apply(&mut server).unwrap();
/// assert_eq!(server.port, 8080);
/// ```
#[derive(Clone)]
pub struct EnvironmentAdapter {
    entries: Vec<(FieldPath, String)>,
    lookup: Lookup,
}

impl EnvironmentAdapter {
    /// Creates an adapter from `(path, variable name)` entries, reading the process
    /// environment.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<FieldPath>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, name)| (path.into(), name.into()))
                .collect(),
            lookup: Arc::new(|name: &str| env::var(name).ok()),
        }
    }

    /// Appends an entry, applied after the existing ones.
    pub fn with_entry(mut self, path: impl Into<FieldPath>, name: impl Into<String>) -> Self {
        self.entries.push((path.into(), name.into()));
        self
    }

    /// Replaces the variable lookup function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgbind::adapters::EnvironmentAdapter;
    ///
    /// let adapter = EnvironmentAdapter::new([("port", "PORT")])
    ///     .with_lookup(|name| (name == "PORT").then(|| "8080".to_string()));
    /// ```
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Arc::new(lookup);
        self
    }

    /// Reads variables from `values` instead of the process environment.
    ///
    /// **Note**: This method is primarily intended for testing.
    pub fn with_values(self, values: HashMap<String, String>) -> Self {
        self.with_lookup(move |name| values.get(name).cloned())
    }

    /// Returns the `(path, variable name)` entries.
    pub fn entries(&self) -> &[(FieldPath, String)] {
        &self.entries
    }
}

impl fmt::Debug for EnvironmentAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentAdapter")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<T: Record> ConfigSource<T> for EnvironmentAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn apply(&self, target: &mut T) -> Result<()> {
        for (path, name) in &self.entries {
            let mut field = match resolver::resolve(&mut *target, path) {
                Ok(field) => field,
                Err(e) if e.is_not_found() => {
                    tracing::debug!("Skipping unknown field '{}' for variable {}", path, name);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let value = match (self.lookup)(name) {
                Some(value) if !value.is_empty() => value,
                _ => continue,
            };
            coercer::assign_text(&mut field, path, &value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;
    use serde::Deserialize;
    use std::time::Duration;

    // Helper to set and clean up environment variables
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
    struct Settings {
        name: String,
        num: i64,
        timeout: Duration,
        nick: Option<String>,
        version: u32,
    }

    bind_record! {
        Settings {
            "Name" => name,
            "Num" => num,
            "Timeout" => timeout,
            "Nick" => nick,
            "Version" => version (read_only),
        }
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_adapter_name() {
        let adapter = EnvironmentAdapter::new(Vec::<(String, String)>::new());
        assert_eq!(ConfigSource::<Settings>::name(&adapter), "env");
        assert!(adapter.entries().is_empty());
    }

    #[test]
    fn test_env_adapter_process_environment() {
        let mut guard = EnvGuard::new();
        guard.set("CFGBIND_TEST_ENV_NAME", "Fredrik");

        let adapter = EnvironmentAdapter::new([("Name", "CFGBIND_TEST_ENV_NAME")]);
        let mut settings = Settings::default();
        adapter.apply(&mut settings).unwrap();
        assert_eq!(settings.name, "Fredrik");
    }

    #[test]
    fn test_env_adapter_parses_values() {
        let adapter = EnvironmentAdapter::new([("Num", "NUM"), ("Timeout", "TIMEOUT")])
            .with_values(values(&[("NUM", "42"), ("TIMEOUT", "56")]));
        let mut settings = Settings::default();
        adapter.apply(&mut settings).unwrap();
        assert_eq!(settings.num, 42);
        assert_eq!(settings.timeout, Duration::from_nanos(56));
    }

    #[test]
    fn test_env_adapter_skips_unset_and_empty() {
        let adapter = EnvironmentAdapter::new([("Name", "EMPTY"), ("Num", "UNSET"), ("Nick", "NICK")])
            .with_values(values(&[("EMPTY", ""), ("NICK", "fb")]));
        let mut settings = Settings {
            name: "kept".to_string(),
            num: 3,
            ..Settings::default()
        };
        adapter.apply(&mut settings).unwrap();
        assert_eq!(settings.name, "kept");
        assert_eq!(settings.num, 3);
        assert_eq!(settings.nick.as_deref(), Some("fb"));
    }

    #[test]
    fn test_env_adapter_skips_unknown_paths() {
        let adapter = EnvironmentAdapter::new([("Missing", "NUM"), ("Num", "NUM")])
            .with_values(values(&[("NUM", "5")]));
        let mut settings = Settings::default();
        adapter.apply(&mut settings).unwrap();
        assert_eq!(settings.num, 5);
    }

    #[test]
    fn test_env_adapter_assigns_large_values() {
        let big = "x".repeat(2 * 1024 * 1024);
        let expected = big.clone();
        let adapter = EnvironmentAdapter::new([("Name", "BIG")])
            .with_lookup(move |_| Some(big.clone()));
        let mut settings = Settings::default();
        adapter.apply(&mut settings).unwrap();
        assert_eq!(settings.name, expected);
    }

    #[test]
    fn test_env_adapter_conversion_error() {
        let adapter =
            EnvironmentAdapter::new([("Num", "NUM")]).with_values(values(&[("NUM", "abc")]));
        let mut settings = Settings::default();
        let err = adapter.apply(&mut settings).unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversionError { .. }));
    }

    #[test]
    fn test_env_adapter_read_only() {
        let adapter = EnvironmentAdapter::new([("Version", "VERSION")])
            .with_values(values(&[("VERSION", "2")]));
        let mut settings = Settings::default();
        let err = adapter.apply(&mut settings).unwrap_err();
        assert!(matches!(err, ConfigError::FieldNotSettable { .. }));
    }

    #[test]
    fn test_env_adapter_with_entry_order() {
        let adapter = EnvironmentAdapter::new([("Num", "FIRST")])
            .with_entry("Num", "SECOND")
            .with_values(values(&[("FIRST", "1"), ("SECOND", "2")]));
        let mut settings = Settings::default();
        adapter.apply(&mut settings).unwrap();
        assert_eq!(settings.num, 2);
        assert!(format!("{:?}", adapter).contains("SECOND"));
    }
}
