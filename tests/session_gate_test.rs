//! Integration tests for the session gate and the auth flow.

mod common;

use common::TestApp;
use keycuddle::adapters::mock::RecordedAuthCall;
use keycuddle::app::{AuthMode, Screen};
use keycuddle::error::AuthError;
use keycuddle::session::AuthStatus;

#[tokio::test]
async fn test_startup_resolves_to_anonymous() {
    let mut t = TestApp::new();
    assert_eq!(*t.app.session.status(), AuthStatus::Loading);
    t.app.session.resolve(None);
    assert_eq!(*t.app.session.status(), AuthStatus::Anonymous);
    assert_eq!(t.app.screen, Screen::Login);
}

#[tokio::test]
async fn test_successful_sign_in_authenticates_and_attaches_token() {
    let mut t = TestApp::new();
    t.sign_in_as("u1").await;

    assert_eq!(
        *t.app.session.status(),
        AuthStatus::Authenticated {
            user_id: "u1".to_string()
        }
    );
    assert_eq!(t.store.session_token(), Some("token-u1".to_string()));
    assert_eq!(
        t.auth.calls(),
        vec![RecordedAuthCall::SignIn {
            email: "u1@example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_failed_sign_in_stays_anonymous_with_notice() {
    let mut t = TestApp::new();
    t.auth.fail_sign_in(AuthError::InvalidCredentials);
    t.app.login.email = "a@b.com".to_string();
    t.app.login.password = "wrong".to_string();
    t.app.submit_login();
    t.step().await;

    assert_eq!(*t.app.session.status(), AuthStatus::Anonymous);
    assert_eq!(t.app.screen, Screen::Login);
    assert!(!t.app.login.busy);
    assert!(t.app.notice.is_some());
}

#[tokio::test]
async fn test_registration_signs_the_account_in() {
    let mut t = TestApp::new();
    t.app.login.toggle_mode();
    assert_eq!(t.app.login.mode, AuthMode::Register);
    t.app.login.fullname = "Ada Lovelace".to_string();
    t.app.login.age = "28".to_string();
    t.app.login.email = "ada@example.com".to_string();
    t.app.login.password = "hunter2".to_string();
    t.app.submit_login();
    t.step().await;

    assert!(t.app.session.is_authenticated());
    assert_eq!(t.app.screen, Screen::Vault);
    assert!(t.app.vault.is_subscribed());
    assert_eq!(
        t.auth.calls(),
        vec![RecordedAuthCall::SignUp {
            email: "ada@example.com".to_string()
        }]
    );
}

#[tokio::test]
async fn test_register_existing_account_is_rejected() {
    let mut t = TestApp::new();
    t.auth.fail_sign_up(AuthError::AccountExists);
    t.app.login.toggle_mode();
    t.app.login.fullname = "Ada".to_string();
    t.app.login.age = "28".to_string();
    t.app.login.email = "ada@example.com".to_string();
    t.app.login.password = "hunter2".to_string();
    t.app.submit_login();
    t.step().await;

    assert!(!t.app.session.is_authenticated());
    assert!(t.app.notice.is_some());
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let mut t = TestApp::new();
    t.sign_in_as("u1").await;

    t.app.sign_out();
    t.app.sign_out();
    assert_eq!(*t.app.session.status(), AuthStatus::Anonymous);
    assert_eq!(t.app.notice.as_ref().unwrap().text, "Signed out.");
    assert_eq!(t.app.screen, Screen::Login);
    assert!(!t.app.vault.is_subscribed());
    assert_eq!(t.store.live_subscriber_count(), 0);
}
