//! Dotted path splitting and resolution.
//!
//! A path string is split on a literal [`Delimiter`] (`"."` unless configured)
//! with no escaping, so a key that itself contains the delimiter cannot be
//! addressed. The whole-path string [`THIS`] addresses the record itself.
//!
//! ```rust
//! use dotprop_core::path::{Delimiter, resolve};
//! use serde_json::json;
//!
//! let record = json!({ "a": { "b": [10, 20] } });
//! let d = Delimiter::default();
//! assert_eq!(resolve(&record, "a.b.1", &d), Some(&json!(20)));
//! assert_eq!(resolve(&record, "a.x", &d), None);
//! assert_eq!(resolve(&record, "this", &d), Some(&record));
//! ```

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::error::PropError;

/// Path that resolves to the record itself.
pub const THIS: &str = "this";

/// Validated, non-empty segment separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiter(String);

impl Delimiter {
    pub fn new(s: impl Into<String>) -> Result<Self, PropError> {
        let s = s.into();
        if s.is_empty() {
            return Err(PropError::EmptyDelimiter);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self(".".to_string())
    }
}

impl FromStr for Delimiter {
    type Err = PropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits `path` into its segments. Every occurrence of the delimiter splits.
pub fn segments<'a>(path: &'a str, delimiter: &Delimiter) -> Vec<&'a str> {
    path.split(delimiter.as_str()).collect()
}

/// Looks up one segment: a key in a mapping, or a decimal index in a sequence.
pub(crate) fn child<'v>(node: &'v Value, seg: &str) -> Option<&'v Value> {
    match node {
        Value::Object(map) => map.get(seg),
        Value::Array(arr) => seg.parse::<usize>().ok().and_then(|i| arr.get(i)),
        _ => None,
    }
}

pub(crate) fn child_mut<'v>(node: &'v mut Value, seg: &str) -> Option<&'v mut Value> {
    match node {
        Value::Object(map) => map.get_mut(seg),
        Value::Array(arr) => seg.parse::<usize>().ok().and_then(|i| arr.get_mut(i)),
        _ => None,
    }
}

/// Walks `path` from `record`.
///
/// Returns `None` when the record is `null`, or as soon as a segment is looked
/// up on a leaf or names a missing key or index.
pub fn resolve<'v>(record: &'v Value, path: &str, delimiter: &Delimiter) -> Option<&'v Value> {
    if record.is_null() {
        return None;
    }
    if path == THIS {
        return Some(record);
    }
    let found = path
        .split(delimiter.as_str())
        .try_fold(record, |node, seg| child(node, seg));
    if found.is_none() {
        tracing::trace!(path, "path did not resolve");
    }
    found
}

pub fn resolve_mut<'v>(record: &'v mut Value, path: &str, delimiter: &Delimiter) -> Option<&'v mut Value> {
    if record.is_null() {
        return None;
    }
    if path == THIS {
        return Some(record);
    }
    path.split(delimiter.as_str())
        .try_fold(record, |node, seg| child_mut(node, seg))
}
