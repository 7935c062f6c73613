use std::fs;
use std::path::Path;

use crate::error::GenerateError;

/// Load the whole schema-definition file into memory
pub fn read_schema(path: &Path) -> Result<String, GenerateError> {
    fs::read_to_string(path).map_err(|source| GenerateError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })
}
