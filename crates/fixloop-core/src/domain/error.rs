//! Domain-level error taxonomy for fixloop.

/// Errors raised by fixloop core operations.
///
/// Verification *verdicts* (regressions, text mismatches, expectation
/// failures) are ordinary return values, not errors; this enum covers
/// genuine faults only.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{field} must be >= -1, got {value}")]
    LocationOutOfRange { field: &'static str, value: i32 },

    #[error("project cannot be analyzed: {0}")]
    ProjectInvalid(String),

    #[error("fix index {index} out of range, provider offered {offered} actions")]
    FixIndexOutOfRange { index: usize, offered: usize },

    #[error("operation aborted by cancellation")]
    Aborted,
}

/// Result type for fixloop core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
