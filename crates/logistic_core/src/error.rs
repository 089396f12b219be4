use thiserror::Error;

/// Failures reported eagerly at the component boundary, before any iteration.
///
/// Degenerate inputs (zero iterations, zero samples) are not errors: they
/// produce empty results. Non-finite values produced by the recurrence are
/// not errors either; they propagate through the output arrays.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogisticError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl LogisticError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LogisticError::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LogisticError>;
