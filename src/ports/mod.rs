// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the traits at the seams of the crate: the field descriptors a
//! target exposes, the sources applied to a target, and the decoders turning raw content
//! into a target.

pub mod decoder;
pub mod field;
pub mod source;

// Re-export commonly used types
pub use decoder::ContentDecoder;
pub use field::{Allocation, Field, FieldMut, Kind, Record};
pub use source::{BoxedSource, ConfigSource};
