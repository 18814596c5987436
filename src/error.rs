//! Error type shared by every calculator entry point

use thiserror::Error;

/// A calculator input violated one of its invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl CalcError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter
    pub fn field(&self) -> &str {
        match self {
            CalcError::InvalidInput { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
