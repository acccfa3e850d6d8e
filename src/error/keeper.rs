//! Unified error type consolidating all domain errors.

use std::fmt;

use super::{AuthError, StoreError, ValidationError};

/// Any error the client can surface to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeeperError {
    Validation(ValidationError),
    Auth(AuthError),
    Store(StoreError),
}

impl KeeperError {
    /// Get a user-friendly error message suitable for the notice line.
    pub fn user_message(&self) -> String {
        match self {
            KeeperError::Validation(e) => e.user_message(),
            KeeperError::Auth(e) => e.user_message(),
            KeeperError::Store(e) => e.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            KeeperError::Validation(e) => e.error_code(),
            KeeperError::Auth(e) => e.error_code(),
            KeeperError::Store(e) => e.error_code(),
        }
    }

    /// Check if the user must sign in again to recover.
    pub fn requires_reauth(&self) -> bool {
        match self {
            KeeperError::Validation(_) => false,
            KeeperError::Auth(e) => e.requires_reauth(),
            KeeperError::Store(e) => e.requires_reauth(),
        }
    }
}

impl fmt::Display for KeeperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeeperError::Validation(e) => write!(f, "{}", e),
            KeeperError::Auth(e) => write!(f, "{}", e),
            KeeperError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl From<ValidationError> for KeeperError {
    fn from(e: ValidationError) -> Self {
        KeeperError::Validation(e)
    }
}

impl From<AuthError> for KeeperError {
    fn from(e: AuthError) -> Self {
        KeeperError::Auth(e)
    }
}

impl From<StoreError> for KeeperError {
    fn from(e: StoreError) -> Self {
        KeeperError::Store(e)
    }
}

impl std::error::Error for KeeperError {}
