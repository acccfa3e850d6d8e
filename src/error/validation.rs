//! Form validation errors.
//!
//! Raised before any store call is attempted; a validation failure never
//! reaches the network.

use std::fmt;

/// A required form field is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required credential field is blank.
    MissingField { field: &'static str },
    /// No authenticated user; writes need a collection to land in.
    NoUser,
    /// The edited record no longer exists in the mirror.
    UnknownRecord,
}

impl ValidationError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingField { .. } => "Please fill in all fields.".to_string(),
            ValidationError::NoUser => "You are not signed in. Please sign in first.".to_string(),
            ValidationError::UnknownRecord => {
                "That entry no longer exists. It may have been deleted elsewhere.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "E_VAL_MISSING",
            ValidationError::NoUser => "E_VAL_NO_USER",
            ValidationError::UnknownRecord => "E_VAL_GONE",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { field } => {
                write!(f, "Required field '{}' is empty", field)
            }
            ValidationError::NoUser => write!(f, "No authenticated user"),
            ValidationError::UnknownRecord => write!(f, "Record not found in the local mirror"),
        }
    }
}

impl std::error::Error for ValidationError {}
