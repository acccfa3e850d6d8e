//! Firebase Auth REST adapter.
//!
//! Implements [`AuthClient`] against the Identity Toolkit API:
//! `accounts:signInWithPassword` and `accounts:signUp`. The base URL is
//! configurable so tests can point it at a local mock server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::traits::{AuthClient, AuthSession};

#[derive(Debug, Serialize)]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(rename = "returnSecureToken")]
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(rename = "idToken")]
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// Email/password auth against the Identity Toolkit REST API.
#[derive(Debug, Clone)]
pub struct FirebaseAuth {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuth {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Use a preconfigured reqwest client (timeouts, TLS settings).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url.trim_end_matches('/'),
            action,
            self.api_key
        )
    }

    async fn password_request(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("HTTP {}", status),
            };
            tracing::warn!("Auth {} rejected ({}): {}", action, status, message);
            return Err(AuthError::from_api_message(status, &message));
        }

        let session: SessionResponse =
            response.json().await.map_err(|e| AuthError::Network {
                message: format!("malformed auth response: {}", e),
            })?;

        tracing::info!("Auth {} succeeded for user {}", action, session.local_id);
        Ok(AuthSession {
            user_id: session.local_id,
            id_token: session.id_token,
        })
    }
}

#[async_trait]
impl AuthClient for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.password_request("signInWithPassword", email, password)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.password_request("signUp", email, password).await
    }

    async fn sign_out(&self) {
        // The REST surface has no sign-out call; the session token is
        // simply discarded by the caller.
        tracing::debug!("Session token discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_action_and_key() {
        let auth = FirebaseAuth::new("https://identitytoolkit.googleapis.com", "k123");
        assert_eq!(
            auth.endpoint("signUp"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=k123"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let auth = FirebaseAuth::new("http://localhost:9099/", "k");
        assert_eq!(
            auth.endpoint("signInWithPassword"),
            "http://localhost:9099/v1/accounts:signInWithPassword?key=k"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = PasswordRequest {
            email: "a@b.com",
            password: "pw",
            return_secure_token: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["email"], "a@b.com");
        assert_eq!(value["returnSecureToken"], true);
    }
}
