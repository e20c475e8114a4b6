//! Method-call syntax for the record operations.
//!
//! ```rust
//! use dotprop_core::RecordExt;
//! use serde_json::json;
//!
//! let mut cfg = json!({ "server": { "port": 0, "host": "localhost" } });
//! assert_eq!(cfg.get_prop(["server.port", "server.host"]), Some(&json!("localhost")));
//! cfg.set_prop("server.port", json!(8080))?;
//! assert_eq!(cfg.get_prop_or(["server.port"], 80), json!(8080));
//! # Ok::<(), dotprop_core::PropError>(())
//! ```

use serde_json::{Map, Value};

use crate::access::{get, get_or, set};
use crate::bind::{KeySelector, bind};
use crate::clone::deep_clone;
use crate::error::PropError;
use crate::flat::{flatten, unflatten};

pub trait RecordExt {
    fn get_prop<I, S>(&self, paths: I) -> Option<&Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    fn get_prop_or<I, S>(&self, paths: I, default: impl Into<Value>) -> Value
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    fn set_prop(&mut self, path: &str, value: Value) -> Result<&Value, PropError>;

    fn bind_prop(&mut self, source: &Value, keys: &KeySelector) -> Option<&mut Value>;

    fn deep_clone(&self) -> Value;

    fn flatten(&self) -> Map<String, Value>;

    /// `None` unless `self` is a mapping.
    fn unflatten(&self) -> Option<Value>;
}

impl RecordExt for Value {
    fn get_prop<I, S>(&self, paths: I) -> Option<&Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        get(self, paths)
    }

    fn get_prop_or<I, S>(&self, paths: I, default: impl Into<Value>) -> Value
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        get_or(self, paths, default)
    }

    fn set_prop(&mut self, path: &str, value: Value) -> Result<&Value, PropError> {
        set(self, path, value)
    }

    fn bind_prop(&mut self, source: &Value, keys: &KeySelector) -> Option<&mut Value> {
        bind(self, source, keys)
    }

    fn deep_clone(&self) -> Value {
        deep_clone(self)
    }

    fn flatten(&self) -> Map<String, Value> {
        flatten(self)
    }

    fn unflatten(&self) -> Option<Value> {
        self.as_object().map(unflatten)
    }
}
