//! Session gate: decides which screen the viewer sees.
//!
//! Derives a single `AuthStatus` from the auth capability. While
//! `Loading` nothing but a placeholder is rendered; `Authenticated`
//! renders the vault; `Anonymous` renders the login form.

use crate::traits::AuthSession;

/// The gate's derived state. No other states are reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// The initial session check has not resolved yet.
    Loading,
    Authenticated { user_id: String },
    Anonymous,
}

/// Tracks the signed-in principal across the app's lifetime.
#[derive(Debug)]
pub struct SessionGate {
    status: AuthStatus,
    session: Option<AuthSession>,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate {
    /// A gate that starts in `Loading`.
    pub fn new() -> Self {
        Self {
            status: AuthStatus::Loading,
            session: None,
        }
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, AuthStatus::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticated { .. })
    }

    /// The signed-in user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::Authenticated { user_id } => Some(user_id),
            _ => None,
        }
    }

    /// The full session (id token included), if signed in.
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Resolve the initial session check: a stored principal, or none.
    pub fn resolve(&mut self, session: Option<AuthSession>) {
        match session {
            Some(session) => self.signed_in(session),
            None => {
                self.status = AuthStatus::Anonymous;
                self.session = None;
            }
        }
    }

    /// The auth capability reported a signed-in principal.
    pub fn signed_in(&mut self, session: AuthSession) {
        tracing::info!("Signed in as {}", session.user_id);
        self.status = AuthStatus::Authenticated {
            user_id: session.user_id.clone(),
        };
        self.session = Some(session);
    }

    /// Explicit sign-out or session invalidation.
    ///
    /// Always lands in `Anonymous`; calling it while already signed out
    /// is a no-op, never an error.
    pub fn sign_out(&mut self) {
        if self.is_authenticated() {
            tracing::info!("Signed out");
        }
        self.status = AuthStatus::Anonymous;
        self.session = None;
    }
}
