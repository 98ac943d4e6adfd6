// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotted field path newtype.
//!
//! This module provides the `FieldPath` type, a newtype around `String` naming a field
//! inside a target record, e.g. `Database.Host`.

use std::fmt;

/// A `.`-separated path addressing a field of a target record.
///
/// The first segment names a field of the target itself, every following segment names a
/// field of the record reached so far. An empty path has no segments and never resolves.
///
/// # Examples
///
/// ```
/// use cfgbind::domain::FieldPath;
///
/// let path = FieldPath::from("Child.Name");
/// assert_eq!(path.segments().collect::<Vec<_>>(), vec!["Child", "Name"]);
/// assert_eq!(path.depth(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a new `FieldPath` from a `String`.
    pub fn new(path: String) -> Self {
        FieldPath(path)
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the path segments in order.
    ///
    /// An empty path yields nothing.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let path = if self.0.is_empty() { None } else { Some(&self.0) };
        path.into_iter().flat_map(|p| p.split('.'))
    }

    /// Returns the number of segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgbind::domain::FieldPath;
    ///
    /// assert_eq!(FieldPath::from("").depth(), 0);
    /// assert_eq!(FieldPath::from("Name").depth(), 1);
    /// ```
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Converts the `FieldPath` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        FieldPath(s)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        FieldPath(s.to_string())
    }
}

impl From<&String> for FieldPath {
    fn from(s: &String) -> Self {
        FieldPath(s.clone())
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
