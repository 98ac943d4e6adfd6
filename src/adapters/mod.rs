// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports layer:
//! one `ConfigSource` per kind of input, and the `ContentDecoder`s used for raw content
//! and files.

pub mod content;
pub mod data;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file;
pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use content::ContentAdapter;
pub use data::DataAdapter;
#[cfg(feature = "env")]
pub use env_var::EnvironmentAdapter;
pub use file::FileAdapter;
pub use json::JsonDecoder;
#[cfg(feature = "yaml")]
pub use yaml::YamlDecoder;
