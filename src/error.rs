use thiserror::Error;

/// Convenience result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Error type returned across the crate.
///
/// This is a single error enum shared by the source boundary, both decoders,
/// hierarchy resolution, and the persistence sinks.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Underlying I/O error (e.g. source file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A formatter rejected the raw value extracted for a field.
    #[error("failed to format value at line {line} field '{field}': {message} (raw='{raw}')")]
    Format {
        /// 1-based line number in the original input text.
        line: usize,
        /// Schema field whose formatter failed.
        field: String,
        /// Raw (trimmed) value handed to the formatter.
        raw: String,
        /// Formatter-provided failure message.
        message: String,
    },

    /// Hierarchy resolution referenced a field the record set does not carry.
    #[error("unknown field '{field}' in record set")]
    UnknownField {
        /// The missing field name.
        field: String,
    },

    /// CSV failure at the persistence boundary.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON failure at the persistence boundary.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
