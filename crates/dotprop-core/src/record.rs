//! Record model over `serde_json::Value`.
//! - `RecordKind` classifies a node as leaf, mapping or sequence.
//! - `JsonKind` is the finer per-variant kind shown when browsing children.
//! - `is_truthy` decides what counts as "found" for fallback reads.
use serde_json::Value;

use crate::error::PropError;
use crate::path::{Delimiter, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Leaf,
    Mapping,
    Sequence,
}

impl RecordKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Object(_) => RecordKind::Mapping,
            Value::Array(_) => RecordKind::Sequence,
            _ => RecordKind::Leaf,
        }
    }

    pub fn is_container(self) -> bool {
        !matches!(self, RecordKind::Leaf)
    }
}

/// Falsy values are `null`, `false`, zero and the empty string.
///
/// Empty mappings and sequences are truthy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind { Null, Bool, Number, String, Object, Array }

#[derive(Debug, Clone)]
pub struct ChildInfo { pub key_or_index: String, pub kind: JsonKind, pub len: Option<usize> }

pub fn kind_of(v: &Value) -> JsonKind {
    match v {
        Value::Null => JsonKind::Null,
        Value::Bool(_) => JsonKind::Bool,
        Value::Number(_) => JsonKind::Number,
        Value::String(_) => JsonKind::String,
        Value::Object(_) => JsonKind::Object,
        Value::Array(_) => JsonKind::Array,
    }
}

pub(crate) fn container_len(v: &Value) -> Option<usize> {
    match v { Value::Array(a) => Some(a.len()), Value::Object(m) => Some(m.len()), _ => None }
}

/// Lists the direct children of the node at `path` (`"this"` for the root).
/// A leaf has no children and yields an empty list.
pub fn list_children(record: &Value, path: &str, delimiter: &Delimiter) -> Result<Vec<ChildInfo>, PropError> {
    let node = resolve(record, path, delimiter).ok_or_else(|| PropError::not_found(path))?;
    let mut out = Vec::new();
    match node {
        Value::Object(map) => {
            for (k, v) in map.iter() {
                out.push(ChildInfo { key_or_index: k.clone(), kind: kind_of(v), len: container_len(v) });
            }
        }
        Value::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                out.push(ChildInfo { key_or_index: i.to_string(), kind: kind_of(v), len: container_len(v) });
            }
        }
        _ => {}
    }
    Ok(out)
}
