// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the unit of work a binding session applies
//! to its target. Every kind of input (raw content, files, path/value maps, environment
//! variables) is an adapter implementing this trait.

use crate::domain::Result;

/// A source of configuration values for targets of type `T`.
///
/// Applying a source writes its values into the target in place. A source is applied by
/// shared reference, so the same source may be applied again (to the same or another
/// target).
///
/// # Examples
///
/// ```rust
/// use cfgbind::domain::Result;
/// use cfgbind::ports::ConfigSource;
///
/// struct Fixed(u16);
///
/// impl ConfigSource<u16> for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn apply(&self, target: &mut u16) -> Result<()> {
///         *target = self.0;
///         Ok(())
///     }
/// }
///
/// let mut port = 0;
/// Fixed(8080).apply(&mut port).unwrap();
/// assert_eq!(port, 8080);
/// ```
pub trait ConfigSource<T> {
    /// Returns the name of this source.
    ///
    /// Used for logging and to record which sources a session has applied.
    fn name(&self) -> &str;

    /// Writes this source's values into `target`.
    ///
    /// # Errors
    ///
    /// The first error aborts the remaining writes of this source. Writes made before the
    /// error are kept.
    fn apply(&self, target: &mut T) -> Result<()>;
}

/// A boxed source, as accepted by [`Config`](crate::service::Config).
pub type BoxedSource<T> = Box<dyn ConfigSource<T>>;
