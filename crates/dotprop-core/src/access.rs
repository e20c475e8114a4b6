//! Multi-path reads and strict single-path writes.
//!
//! Reads try each candidate path in order and return the first one that is
//! *found*. By default "found" means truthy, so a resolved `0`, `""`, `false`
//! or `null` falls through to the next candidate. [`Fallback::Exists`] accepts
//! any resolved value instead.
//!
//! ```rust
//! use dotprop_core::{get, get_or, set};
//! use serde_json::json;
//!
//! let mut record = json!({ "a": { "b": 1, "c": 2 } });
//! assert_eq!(get(&record, ["a.x", "a.b", "a.c"]), Some(&json!(1)));
//! assert_eq!(get_or(&record, ["a.e", "x.y"], "fallback"), json!("fallback"));
//!
//! set(&mut record, "a.c", json!(3))?;
//! assert!(set(&mut record, "a.x.y", json!(2)).is_err());
//! # Ok::<(), dotprop_core::PropError>(())
//! ```

use serde_json::Value;

use crate::error::PropError;
use crate::path::{Delimiter, child_mut, resolve};
use crate::record::is_truthy;

/// Decides whether a resolved value ends the candidate search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Only truthy values count; `0`, `""`, `false` and `null` fall through.
    #[default]
    Truthy,
    /// Any value that resolves counts, including `null`.
    Exists,
}

impl Fallback {
    fn accepts(self, v: &Value) -> bool {
        match self {
            Fallback::Truthy => is_truthy(v),
            Fallback::Exists => true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    pub delimiter: Delimiter,
    pub fallback: Fallback,
}

pub fn get<'v, I, S>(record: &'v Value, paths: I) -> Option<&'v Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    get_with(record, paths, &GetOptions::default())
}

/// Like [`get`], returning an owned copy of the match or `default`.
pub fn get_or<I, S>(record: &Value, paths: I, default: impl Into<Value>) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match get(record, paths) {
        Some(v) => v.clone(),
        None => default.into(),
    }
}

pub fn get_with<'v, I, S>(record: &'v Value, paths: I, opts: &GetOptions) -> Option<&'v Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !is_truthy(record) {
        return None;
    }
    paths.into_iter().find_map(|p| {
        resolve(record, p.as_ref(), &opts.delimiter).filter(|v| opts.fallback.accepts(v))
    })
}

/// Reads with one or more candidate paths and an optional default.
///
/// `get_prop!(record, "a.x", "a.b")` expands to [`get`] and yields
/// `Option<&Value>`; `get_prop!(record, "a.x", "a.b"; default)` expands to
/// [`get_or`] and yields an owned `Value`.
#[macro_export]
macro_rules! get_prop {
    ($record:expr, $($path:expr),+ ; $default:expr) => {
        $crate::access::get_or($record, [$($path),+], $default)
    };
    ($record:expr, $($path:expr),+ $(,)?) => {
        $crate::access::get($record, [$($path),+])
    };
}

/// Candidate paths and default taken from an untyped argument list.
///
/// Hosts that receive arguments as JSON values (command lines, RPC payloads)
/// use this to apply the positional convention:
/// - `[["a.b", "c"], default]`: a leading list is the candidate set and the
///   next argument is the default;
/// - `["a.b", "c", default]`: with two or more arguments, a trailing non-string
///   is the default.
///
/// Non-string candidates never resolve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetArgs {
    pub paths: Vec<Value>,
    pub default: Value,
}

impl GetArgs {
    pub fn from_values(args: Vec<Value>) -> Self {
        let mut it = args.into_iter();
        match it.next() {
            Some(Value::Array(paths)) => Self {
                paths,
                default: it.next().unwrap_or_default(),
            },
            Some(first) => {
                let mut paths = vec![first];
                paths.extend(it);
                let default = if paths.len() > 1 && !paths.last().is_some_and(Value::is_string) {
                    paths.pop().unwrap_or_default()
                } else {
                    Value::Null
                };
                Self { paths, default }
            }
            None => Self::default(),
        }
    }

    pub fn eval(&self, record: &Value, opts: &GetOptions) -> Value {
        let candidates = self.paths.iter().filter_map(Value::as_str);
        match get_with(record, candidates, opts) {
            Some(v) => v.clone(),
            None => self.default.clone(),
        }
    }
}

pub fn set<'v>(record: &'v mut Value, path: &str, value: Value) -> Result<&'v Value, PropError> {
    set_with(record, path, value, &Delimiter::default())
}

/// Assigns `value` at `path` without creating intermediate containers.
///
/// Every segment but the last must already resolve to a mapping or sequence.
/// On error the record is left untouched and [`PropError::is_not_found`] is
/// true, whether a segment was missing or named a leaf. A sequence accepts a
/// final index up to its length; the length itself appends.
pub fn set_with<'v>(
    record: &'v mut Value,
    path: &str,
    value: Value,
    delimiter: &Delimiter,
) -> Result<&'v Value, PropError> {
    if record.is_null() {
        return Err(PropError::not_found(path));
    }
    let (parent, last) = match path.rsplit_once(delimiter.as_str()) {
        Some((parent_path, last)) => {
            let parent = parent_path
                .split(delimiter.as_str())
                .try_fold(record, |node, seg| child_mut(node, seg))
                .ok_or_else(|| {
                    tracing::debug!(path, "set: intermediate segment does not exist");
                    PropError::not_found(path)
                })?;
            (parent, last)
        }
        None => (record, path),
    };
    assign(parent, last, value, path)
}

fn assign<'v>(node: &'v mut Value, key: &str, value: Value, path: &str) -> Result<&'v Value, PropError> {
    match node {
        Value::Object(map) => {
            let slot = map.entry(key).or_insert(Value::Null);
            *slot = value;
            Ok(&*slot)
        }
        Value::Array(arr) => {
            let i = key
                .parse::<usize>()
                .ok()
                .filter(|i| *i <= arr.len())
                .ok_or_else(|| PropError::not_found(path))?;
            if i == arr.len() {
                arr.push(value);
            } else {
                arr[i] = value;
            }
            Ok(&arr[i])
        }
        _ => {
            tracing::debug!(path, "set: parent is a leaf");
            Err(PropError::not_a_container(path))
        }
    }
}
