//! Mock auth client for testing.
//!
//! Scripted outcomes per email, with recorded calls for verification.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AuthError;
use crate::traits::{AuthClient, AuthSession};

/// A recorded auth call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedAuthCall {
    SignIn { email: String },
    SignUp { email: String },
    SignOut,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, AuthSession>,
    sign_in_error: Option<AuthError>,
    sign_up_error: Option<AuthError>,
    calls: Vec<RecordedAuthCall>,
}

/// Mock auth client.
///
/// Sessions are registered per email with [`register_account`]; unknown
/// emails sign in as [`AuthError::AccountNotFound`]. Any outcome can be
/// overridden with an injected error.
///
/// [`register_account`]: MockAuthClient::register_account
#[derive(Clone, Default)]
pub struct MockAuthClient {
    inner: Arc<Mutex<Inner>>,
}

impl MockAuthClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate an email with a session to be returned on sign-in.
    pub fn register_account(&self, email: &str, session: AuthSession) {
        let mut inner = self.inner.lock().unwrap();
        inner.accounts.insert(email.to_string(), session);
    }

    /// Force the next sign-in attempts to fail with `error`.
    pub fn fail_sign_in(&self, error: AuthError) {
        self.inner.lock().unwrap().sign_in_error = Some(error);
    }

    /// Force the next sign-up attempts to fail with `error`.
    pub fn fail_sign_up(&self, error: AuthError) {
        self.inner.lock().unwrap().sign_up_error = Some(error);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedAuthCall> {
        self.inner.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl AuthClient for MockAuthClient {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession, AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedAuthCall::SignIn {
            email: email.to_string(),
        });
        if let Some(error) = inner.sign_in_error.clone() {
            return Err(error);
        }
        inner
            .accounts
            .get(email)
            .cloned()
            .ok_or(AuthError::AccountNotFound)
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthSession, AuthError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedAuthCall::SignUp {
            email: email.to_string(),
        });
        if let Some(error) = inner.sign_up_error.clone() {
            return Err(error);
        }
        if inner.accounts.contains_key(email) {
            return Err(AuthError::AccountExists);
        }
        let session = AuthSession {
            user_id: format!("user-{}", inner.accounts.len() + 1),
            id_token: "mock-token".to_string(),
        };
        inner.accounts.insert(email.to_string(), session.clone());
        Ok(session)
    }

    async fn sign_out(&self) {
        self.inner.lock().unwrap().calls.push(RecordedAuthCall::SignOut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            user_id: "u1".to_string(),
            id_token: "t1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_registered_account_signs_in() {
        let auth = MockAuthClient::new();
        auth.register_account("a@b.com", session());
        let result = auth.sign_in("a@b.com", "pw").await.unwrap();
        assert_eq!(result.user_id, "u1");
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let auth = MockAuthClient::new();
        assert_eq!(
            auth.sign_in("nobody@b.com", "pw").await.unwrap_err(),
            AuthError::AccountNotFound
        );
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_fails() {
        let auth = MockAuthClient::new();
        auth.register_account("a@b.com", session());
        assert_eq!(
            auth.sign_up("a@b.com", "pw").await.unwrap_err(),
            AuthError::AccountExists
        );
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let auth = MockAuthClient::new();
        let _ = auth.sign_in("a@b.com", "pw").await;
        auth.sign_out().await;
        assert_eq!(
            auth.calls(),
            vec![
                RecordedAuthCall::SignIn {
                    email: "a@b.com".to_string()
                },
                RecordedAuthCall::SignOut,
            ]
        );
    }
}
