//! Error handling for KeyCuddle.
//!
//! Four error kinds cover everything the client can surface:
//!
//! - [`ValidationError`] - a required field is missing; caught before any
//!   network call is attempted
//! - [`AuthError`] - sign-in/sign-up rejected, or the session became invalid
//! - [`StoreError`] - a create/update/delete was rejected by the backend, or
//!   the live feed failed
//! - [`KeeperError`] - unified wrapper consolidating the above
//!
//! None of these are fatal. Every kind is caught at the point of the async
//! call and turned into a dismissible notice; the worst outcome is a stale
//! or empty list with a visible error and the ability to retry.

mod auth;
mod keeper;
mod store;
mod validation;

pub use auth::AuthError;
pub use keeper::KeeperError;
pub use store::{StoreError, WriteOp};
pub use validation::ValidationError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Every error kind converts into the unified type and keeps its
    /// user message and error code.
    #[test]
    fn test_error_unification() {
        let validation: KeeperError = ValidationError::MissingField { field: "title" }.into();
        let auth: KeeperError = AuthError::InvalidCredentials.into();
        let write: KeeperError = StoreError::WriteRejected {
            op: WriteOp::Create,
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        let feed: KeeperError = StoreError::SubscriptionFailed {
            message: "stream closed".to_string(),
        }
        .into();

        for err in [&validation, &auth, &write, &feed] {
            assert!(!err.user_message().is_empty());
            assert!(err.error_code().starts_with("E_"));
        }

        assert!(matches!(validation, KeeperError::Validation(_)));
        assert!(matches!(auth, KeeperError::Auth(_)));
        assert!(matches!(write, KeeperError::Store(_)));
        assert!(matches!(feed, KeeperError::Store(_)));
    }

    /// Subscription failures are "no data", never fatal: they must not be
    /// classified as requiring reauth or blocking retries.
    #[test]
    fn test_subscription_failure_is_recoverable() {
        let err = StoreError::SubscriptionFailed {
            message: "connection reset".to_string(),
        };
        assert!(!err.requires_reauth());
    }
}
