//! dotprop-core: structural utilities for JSON-shaped records
//!
//! This crate focuses on a small, well-factored surface over `serde_json::Value`:
//! - Dotted-path resolution with multi-candidate reads and strict writes
//! - Flatten / unflatten between nested records and single-level maps
//! - Deep clone and key-selective binding between mappings
//! - `RecordExt` for method-call syntax, plus JSON file helpers for the CLI
//!
pub mod access;
pub mod bind;
pub mod clone;
pub mod error;
pub mod ext;
pub mod flat;
pub mod io;
pub mod path;
pub mod record;

pub use access::{Fallback, GetArgs, GetOptions, get, get_or, get_with, set, set_with};
pub use bind::{KeySelector, bind};
pub use clone::deep_clone;
pub use error::PropError;
pub use ext::RecordExt;
pub use flat::{FlattenOptions, SequenceMode, flatten, flatten_with, unflatten, unflatten_with};
pub use io::{read_record, write_record};
pub use path::{Delimiter, THIS, resolve, resolve_mut, segments};
pub use record::{ChildInfo, JsonKind, RecordKind, is_truthy, kind_of, list_children};
