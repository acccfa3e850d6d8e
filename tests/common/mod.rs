//! Common test utilities for integration tests.
//!
//! Provides a [`TestApp`] fixture wiring the application to the mock
//! auth client and mock credential store, plus helpers for driving the
//! message channel the way the event loop does.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use keycuddle::adapters::mock::{MockAuthClient, MockCredentialStore};
use keycuddle::app::{App, AppMessage};
use keycuddle::models::CredentialDraft;
use keycuddle::traits::AuthSession;

/// An [`App`] wired to mock adapters, with the message receiver the
/// event loop would normally own.
pub struct TestApp {
    pub app: App,
    pub auth: Arc<MockAuthClient>,
    pub store: Arc<MockCredentialStore>,
    rx: mpsc::UnboundedReceiver<AppMessage>,
}

impl TestApp {
    pub fn new() -> Self {
        let auth = Arc::new(MockAuthClient::new());
        let store = Arc::new(MockCredentialStore::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(auth.clone(), store.clone(), tx);
        Self {
            app,
            auth,
            store,
            rx,
        }
    }

    /// Wait for the next async message and feed it to the app.
    pub async fn step(&mut self) -> &mut Self {
        let msg = tokio::time::timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("message channel closed");
        self.app.handle_message(msg);
        self
    }

    /// Feed every already-queued message to the app, giving in-flight
    /// tasks a short window to finish.
    pub async fn pump(&mut self) -> &mut Self {
        while let Ok(Some(msg)) =
            tokio::time::timeout(Duration::from_millis(100), self.rx.recv()).await
        {
            self.app.handle_message(msg);
        }
        self
    }

    /// Register an account on the mock backend and sign the app in.
    pub async fn sign_in_as(&mut self, user_id: &str) -> &mut Self {
        let email = format!("{}@example.com", user_id);
        self.auth.register_account(
            &email,
            AuthSession {
                user_id: user_id.to_string(),
                id_token: format!("token-{}", user_id),
            },
        );
        self.app.login.email = email;
        self.app.login.password = "hunter2".to_string();
        self.app.submit_login();
        self.step().await
    }
}

/// A complete draft with every field filled in.
pub fn draft(title: &str, username: &str) -> CredentialDraft {
    CredentialDraft {
        title: title.to_string(),
        username: username.to_string(),
        secret: "s3cret".to_string(),
        url: "https://example.com".to_string(),
        note: "note".to_string(),
    }
}
