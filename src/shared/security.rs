use crate::shared::error::ResolverError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a repository manifest or config file (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists, is not a symbolic link, and is a regular
/// file no larger than `max_size` bytes.
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns a [`ResolverError`] when the metadata cannot be read or one of the
/// checks fails.
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ResolverError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(ResolverError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the real file instead of a link to it".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(ResolverError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    if metadata.len() > max_size {
        return Err(ResolverError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_description,
                metadata.len(),
                max_size
            ),
            hint: "Split the manifest or check that the right file was passed".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Reads a file to a string after [`validate_regular_file`] accepted it.
pub fn read_checked(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description, MAX_FILE_SIZE)?;
    fs::read_to_string(path).map_err(|e| {
        ResolverError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
