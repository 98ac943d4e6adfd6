// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the binding session.
//!
//! [`Config`] drives the adapters against a target: it applies each source in order and
//! gives direct path access for one-off reads and writes.

pub mod config;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder};
