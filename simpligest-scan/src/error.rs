//! Scan error types. Each failure mode gets its own variant so callers
//! can tell a hopeless scan from a correctable one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No recognizable invoice fields in the scanned text")]
    NoRecognizableFields,

    #[error("Malformed RUT '{0}'")]
    MalformedRut(String),

    #[error("Unrecognized date '{0}'")]
    UnrecognizedDate(String),

    #[error("Unparseable amount '{0}'")]
    UnparseableAmount(String),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
