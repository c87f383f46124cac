//! Read review input from a file.

use std::path::Path;

use super::DiffError;

/// Read the whole file at `path` as text.
pub async fn read_input_file(path: &Path) -> Result<String, DiffError> {
    if !path.exists() {
        return Err(DiffError::InputNotFound(path.to_path_buf()));
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DiffError::FileRead {
            path: path.to_path_buf(),
            source,
        })
}
