//! Flatten a nested record into one level of delimiter-joined keys, and back.
//!
//! ```text
//! {"a": 1, "b": {"c": 2, "d": [3]}}  <->  {"a": 1, "b.c": 2, "b.d.0": 3}
//! ```
//!
//! - Empty mappings and sequences are kept as values so they survive a round-trip.
//! - `SequenceMode::Leaf` keeps nested sequences whole instead of indexing them.
//! - `unflatten` splits each key on the first delimiter only. A nested group
//!   whose keys are exactly `"0"` to `"n-1"` is rebuilt as a sequence.
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::path::Delimiter;
use crate::record::{RecordKind, container_len};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Nested sequence entries are keyed by their index.
    #[default]
    Index,
    /// Nested sequences are copied as single values.
    Leaf,
}

#[derive(Debug, Clone, Default)]
pub struct FlattenOptions {
    pub delimiter: Delimiter,
    pub sequences: SequenceMode,
}

pub fn flatten(record: &Value) -> Map<String, Value> {
    flatten_with(record, &FlattenOptions::default())
}

/// A leaf root has no keys and flattens to an empty map. A root sequence is
/// always indexed; `opts.sequences` only applies below the root.
pub fn flatten_with(record: &Value, opts: &FlattenOptions) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(record, None, opts, &mut out);
    tracing::debug!(entries = out.len(), "flattened record");
    out
}

fn flatten_into(node: &Value, prefix: Option<&str>, opts: &FlattenOptions, out: &mut Map<String, Value>) {
    match node {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_entry(k, v, prefix, opts, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_entry(&i.to_string(), v, prefix, opts, out);
            }
        }
        _ => {}
    }
}

fn flatten_entry(key: &str, v: &Value, prefix: Option<&str>, opts: &FlattenOptions, out: &mut Map<String, Value>) {
    let full = match prefix {
        Some(p) => format!("{p}{}{key}", opts.delimiter),
        None => key.to_string(),
    };
    if descends(v, opts.sequences) {
        flatten_into(v, Some(&full), opts, out);
    } else {
        out.insert(full, v.clone());
    }
}

fn descends(v: &Value, sequences: SequenceMode) -> bool {
    match RecordKind::of(v) {
        RecordKind::Leaf => false,
        RecordKind::Sequence if sequences == SequenceMode::Leaf => false,
        RecordKind::Mapping | RecordKind::Sequence => container_len(v).is_some_and(|n| n > 0),
    }
}

pub fn unflatten(flat: &Map<String, Value>) -> Value {
    unflatten_with(flat, &Delimiter::default())
}

/// Rebuilds a nested record from delimiter-joined keys. The root is always a
/// mapping.
///
/// When a plain key and a nested group share a head (`"a"` and `"a.b"`), the
/// nested group wins.
pub fn unflatten_with(flat: &Map<String, Value>, delimiter: &Delimiter) -> Value {
    Value::Object(unflatten_map(flat, delimiter))
}

fn unflatten_map(flat: &Map<String, Value>, delimiter: &Delimiter) -> Map<String, Value> {
    let mut out = Map::new();
    let mut groups: BTreeMap<&str, Map<String, Value>> = BTreeMap::new();
    for (key, v) in flat {
        match key.split_once(delimiter.as_str()) {
            Some((head, rest)) => {
                groups.entry(head).or_default().insert(rest.to_string(), v.clone());
            }
            None => {
                out.insert(key.clone(), v.clone());
            }
        }
    }
    for (head, group) in groups {
        if out.contains_key(head) {
            tracing::debug!(key = head, "nested keys replace plain value");
        }
        out.insert(head.to_string(), sequence_or_mapping(unflatten_map(&group, delimiter)));
    }
    out
}

// Flat keys carry no container kind, so index keys 0..n are read back as a sequence.
fn sequence_or_mapping(mut map: Map<String, Value>) -> Value {
    let n = map.len();
    if n == 0 || !(0..n).all(|i| map.contains_key(&i.to_string())) {
        return Value::Object(map);
    }
    Value::Array((0..n).map(|i| map.remove(&i.to_string()).unwrap_or_default()).collect())
}
