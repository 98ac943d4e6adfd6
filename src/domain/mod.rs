// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the binding core.
//!
//! This module holds the core types (`FieldPath`, `Value`, errors), the per-type coercion
//! strategies (`Setting`), and the two operations everything else is built on: resolving a
//! path to a field and assigning a value to it.

pub mod coercer;
pub mod errors;
pub mod field_path;
pub mod resolver;
pub mod setting;
pub mod value;

// Re-export commonly used types
pub use errors::{BoxError, ConfigError, Result};
pub use field_path::FieldPath;
pub use setting::{FromText, Setting};
pub use value::{TypedValue, Value};
