//! Error types for checkmygrade
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using GradeError
pub type Result<T> = std::result::Result<T, GradeError>;

/// Unified error type for checkmygrade operations
///
/// Every variant is recoverable at the call site; nothing in the library
/// retries or aborts on its own.
#[derive(Debug, Error)]
pub enum GradeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    /// A persist was attempted with no derivable field names
    #[error("Schema error: {0}")]
    Schema(String),

    /// A loaded record is missing fields, carries unknown ones,
    /// or its parallel sequences disagree in length
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A value was rejected before being written because it would not
    /// load back unchanged
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    // -------------------------------------------------------------------------
    // Repository Errors
    // -------------------------------------------------------------------------
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} already exists: {key}")]
    Duplicate { kind: &'static str, key: String },

    #[error("Student {student} is not enrolled in {course}")]
    NotEnrolled { student: String, course: String },

    // -------------------------------------------------------------------------
    // Authentication Errors
    // -------------------------------------------------------------------------
    /// Unknown user, wrong role and wrong password all look the same
    #[error("Authentication failed")]
    AuthFailure,
}

impl GradeError {
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        GradeError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub(crate) fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        GradeError::Duplicate {
            kind,
            key: key.into(),
        }
    }
}
