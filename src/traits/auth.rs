//! Authentication capability trait.

use async_trait::async_trait;

use crate::error::AuthError;

/// A signed-in principal.
///
/// `user_id` names the user's collection path; `id_token` is an opaque
/// credential the store capability attaches to its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: String,
    pub id_token: String,
}

/// Trait for the authentication capability.
///
/// Implementations include the production REST client and a scripted mock
/// for tests. All methods are fire-and-forget from the UI's perspective;
/// callers run them on a background task and deliver the result as an
/// application message.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Sign in with an email/password pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create an account with an email/password pair.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Discard the current session.
    ///
    /// Never fails: signing out while already signed out is a no-op.
    async fn sign_out(&self);
}
