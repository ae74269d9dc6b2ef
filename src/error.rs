/// Errors returned while building, encoding or decoding a
/// [`StructuredError`](crate::record::StructuredError).
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    /// The numeric severity is not one of the 24 defined levels.
    #[error("invalid severity {0}: expected a value in 1..=24")]
    InvalidSeverity(i32),

    /// The record could not be converted to its wire format.
    #[error("failed to encode structured error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The payload is malformed, misses a field or names an unknown severity.
    #[error("failed to decode structured error: {0}")]
    Decoding(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;
