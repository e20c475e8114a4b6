use serde_json::{Map, Value};

/// Deep copy of `record`: every mapping and sequence is rebuilt, leaves are copied.
///
/// The owned `Value` tree cannot contain cycles, so recursion always terminates.
pub fn deep_clone(record: &Value) -> Value {
    match record {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), deep_clone(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        leaf => leaf.clone(),
    }
}
