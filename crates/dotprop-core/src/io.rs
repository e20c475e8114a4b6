use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::PropError;

pub fn read_record(path: &Path) -> Result<Value, PropError> {
    let data = fs::read(path).map_err(|source| PropError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_slice(&data).map_err(|source| PropError::Json { path: path.to_path_buf(), source })
}

/// Writes `value` as pretty-printed JSON, replacing any existing file.
pub fn write_record(path: &Path, value: &Value) -> Result<(), PropError> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|source| PropError::Json { path: path.to_path_buf(), source })?;
    fs::write(path, s).map_err(|source| PropError::Io { path: path.to_path_buf(), source })
}
