//! Filesystem utilities.
//!
//! Helper functions for file operations.

use std::path::Path;

use crate::error::{Result, SddError};

/// Read a file to string, attaching the path to any I/O error.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map_err(|err| SddError::Settings(format!("read {}: {err}", path.display())))
}
