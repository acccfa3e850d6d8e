//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
///
/// These cover sign-in and sign-up rejections from the auth capability as
/// well as session invalidation reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password pair was rejected.
    InvalidCredentials,

    /// Sign-up for an email that already has an account.
    AccountExists,

    /// Sign-in for an email with no account.
    AccountNotFound,

    /// The session token was revoked or expired mid-session.
    SessionInvalid { message: String },

    /// The auth service rejected the request for some other reason.
    ApiError { status: u16, message: String },

    /// The auth service could not be reached.
    Network { message: String },
}

impl AuthError {
    /// Check if this error might be resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::SessionInvalid { .. } | AuthError::ApiError { status: 401, .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => {
                "Email or password is incorrect. Please try again.".to_string()
            }
            AuthError::AccountExists => {
                "An account with this email already exists. Try logging in.".to_string()
            }
            AuthError::AccountNotFound => "Account doesn't exist".to_string(),
            AuthError::SessionInvalid { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::ApiError { status, message } => match *status {
                401 => "Your session has expired. Please sign in again.".to_string(),
                _ => format!("Authentication error: {}", message),
            },
            AuthError::Network { .. } => {
                "Could not reach the sign-in service. Check your connection.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "E_AUTH_INVALID",
            AuthError::AccountExists => "E_AUTH_EXISTS",
            AuthError::AccountNotFound => "E_AUTH_NOT_FOUND",
            AuthError::SessionInvalid { .. } => "E_AUTH_SESSION",
            AuthError::ApiError { .. } => "E_AUTH_API",
            AuthError::Network { .. } => "E_AUTH_NET",
        }
    }

    /// Map a Firebase Auth error message to a variant.
    ///
    /// The REST API reports failures as an upper-snake message inside the
    /// error body (`EMAIL_NOT_FOUND`, `EMAIL_EXISTS`, ...).
    pub fn from_api_message(status: u16, message: &str) -> Self {
        match message {
            m if m.starts_with("EMAIL_NOT_FOUND") => AuthError::AccountNotFound,
            m if m.starts_with("EMAIL_EXISTS") => AuthError::AccountExists,
            m if m.starts_with("INVALID_PASSWORD") || m.starts_with("INVALID_LOGIN_CREDENTIALS") => {
                AuthError::InvalidCredentials
            }
            m if m.starts_with("INVALID_ID_TOKEN") || m.starts_with("TOKEN_EXPIRED") => {
                AuthError::SessionInvalid {
                    message: m.to_string(),
                }
            }
            other => AuthError::ApiError {
                status,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::AccountExists => write!(f, "Account already exists"),
            AuthError::AccountNotFound => write!(f, "Account does not exist"),
            AuthError::SessionInvalid { message } => {
                write!(f, "Session invalid: {}", message)
            }
            AuthError::ApiError { status, message } => {
                write!(f, "Auth API error ({}): {}", status, message)
            }
            AuthError::Network { message } => write!(f, "Auth network error: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.requires_reauth());
        assert_eq!(err.error_code(), "E_AUTH_INVALID");
        assert!(err.user_message().contains("incorrect"));
    }

    #[test]
    fn test_session_invalid_requires_reauth() {
        let err = AuthError::SessionInvalid {
            message: "token revoked".to_string(),
        };
        assert!(err.requires_reauth());
        assert_eq!(err.error_code(), "E_AUTH_SESSION");
    }

    #[test]
    fn test_api_error_401_requires_reauth() {
        let err = AuthError::ApiError {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_api_error_400_not_reauth() {
        let err = AuthError::ApiError {
            status: 400,
            message: "WEAK_PASSWORD".to_string(),
        };
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_from_api_message_mapping() {
        assert_eq!(
            AuthError::from_api_message(400, "EMAIL_NOT_FOUND"),
            AuthError::AccountNotFound
        );
        assert_eq!(
            AuthError::from_api_message(400, "EMAIL_EXISTS"),
            AuthError::AccountExists
        );
        assert_eq!(
            AuthError::from_api_message(400, "INVALID_PASSWORD"),
            AuthError::InvalidCredentials
        );
        assert!(matches!(
            AuthError::from_api_message(400, "INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            AuthError::from_api_message(401, "TOKEN_EXPIRED"),
            AuthError::SessionInvalid { .. }
        ));
        assert!(matches!(
            AuthError::from_api_message(400, "WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::ApiError { status: 400, .. }
        ));
    }

    #[test]
    fn test_account_not_found_message() {
        // The login screen historically showed this exact wording.
        assert_eq!(
            AuthError::AccountNotFound.user_message(),
            "Account doesn't exist"
        );
    }
}
