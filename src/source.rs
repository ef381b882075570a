//! Input boundary: obtain the raw text blob of a ledger export.
//!
//! The engine only needs "the full text content as a single string"; read
//! failures surface as [`crate::error::TransformError::Io`] instead of
//! silently producing an empty line set.

use std::path::Path;

use crate::error::TransformResult;

/// Read the whole file at `path` into a string.
pub fn read_source_text(path: impl AsRef<Path>) -> TransformResult<String> {
    Ok(std::fs::read_to_string(path)?)
}
