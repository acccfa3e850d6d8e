//! User-initiated actions for the App.
//!
//! Each action validates synchronously, then spawns the network call and
//! returns immediately; results come back as [`AppMessage`]s on the event
//! loop. State is only ever mutated in the handlers, so a slow request
//! can never race the UI.

use tokio::sync::mpsc;

use super::{App, AppMessage, AuthMode, Notice, Screen};
use crate::error::ValidationError;
use crate::traits::StoreEvent;

impl App {
    /// Submit the login form in its current mode.
    pub fn submit_login(&mut self) {
        if self.login.busy {
            return;
        }
        match self.login.mode {
            AuthMode::SignIn => self.sign_in(),
            AuthMode::Register => self.register(),
        }
    }

    fn sign_in(&mut self) {
        if self.login.email.trim().is_empty() || self.login.password.is_empty() {
            let err = ValidationError::MissingField { field: "email" };
            self.set_notice(Notice::error(err.user_message()));
            return;
        }
        self.login.busy = true;
        self.mark_dirty();

        let auth = self.auth.clone();
        let message_tx = self.message_tx.clone();
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();
        tokio::spawn(async move {
            let msg = match auth.sign_in(&email, &password).await {
                Ok(session) => AppMessage::SignedIn(session),
                Err(e) => AppMessage::SignInFailed(e),
            };
            let _ = message_tx.send(msg);
        });
    }

    fn register(&mut self) {
        // Full name and age are collected and presence-checked, nothing
        // beyond the account itself is stored.
        let form = &self.login;
        if form.fullname.trim().is_empty()
            || form.age.trim().is_empty()
            || form.email.trim().is_empty()
            || form.password.is_empty()
        {
            let err = ValidationError::MissingField { field: "fullname" };
            self.set_notice(Notice::error(err.user_message()));
            return;
        }
        self.login.busy = true;
        self.mark_dirty();

        let auth = self.auth.clone();
        let message_tx = self.message_tx.clone();
        let email = self.login.email.trim().to_string();
        let password = self.login.password.clone();
        tokio::spawn(async move {
            let msg = match auth.sign_up(&email, &password).await {
                Ok(session) => AppMessage::Registered(session),
                Err(e) => AppMessage::RegisterFailed(e),
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Sign out: tear down the feed and all vault state immediately,
    /// then notify the auth backend in the background.
    pub fn sign_out(&mut self) {
        tracing::info!("Signing out");
        self.vault.reset();
        self.store.set_session_token(None);
        self.session.sign_out();
        self.login.clear();
        self.screen = Screen::Login;
        self.set_notice(Notice::info("Signed out."));
        self.mark_dirty();

        let auth = self.auth.clone();
        tokio::spawn(async move {
            auth.sign_out().await;
        });
    }

    /// Open the live feed for the signed-in user.
    pub(super) fn subscribe_vault(&mut self) {
        let Some(user_id) = self.session.user_id().map(str::to_string) else {
            return;
        };
        let events = self.store_event_sender();
        self.vault.subscribe(&user_id, self.store.as_ref(), events);
    }

    /// Bridge the store's event channel onto the app message channel.
    fn store_event_sender(&self) -> mpsc::UnboundedSender<StoreEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if message_tx.send(AppMessage::Store(event)).is_err() {
                    break;
                }
            }
        });
        tx
    }

    /// Submit the add form as a create write.
    pub fn submit_add(&mut self) {
        let (user_id, draft) = match self.vault.validate_add() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!("add rejected: {}", e.error_code());
                self.set_notice(Notice::error(e.user_message()));
                return;
            }
        };

        let store = self.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match store.create(&user_id, &draft).await {
                Ok(id) => AppMessage::CreateCompleted { user_id, id },
                Err(error) => AppMessage::CreateFailed { user_id, error },
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Commit the editor's working copy as an update write.
    pub fn submit_save(&mut self) {
        let (user_id, id, fields) = match self.vault.validate_save() {
            Ok(payload) => payload,
            Err(e) => {
                self.set_notice(Notice::error(e.user_message()));
                return;
            }
        };

        let store = self.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match store.update(&user_id, &id, &fields).await {
                Ok(()) => AppMessage::UpdateCompleted { user_id, id },
                Err(error) => AppMessage::UpdateFailed { user_id, error },
            };
            let _ = message_tx.send(msg);
        });
    }

    /// Delete the record highlighted in the table.
    pub fn delete_highlighted(&mut self) {
        let Some(id) = self.vault.highlighted().map(|r| r.id.clone()) else {
            return;
        };
        self.delete_record(&id);
    }

    /// Delete by id. Fire-and-forget; the mirror catches up on the next
    /// snapshot.
    pub fn delete_record(&mut self, id: &str) {
        let (user_id, id) = match self.vault.validate_remove(id) {
            Ok(payload) => payload,
            Err(e) => {
                self.set_notice(Notice::error(e.user_message()));
                return;
            }
        };

        let store = self.store.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match store.delete(&user_id, &id).await {
                Ok(()) => AppMessage::DeleteCompleted { user_id, id },
                Err(error) => AppMessage::DeleteFailed { user_id, error },
            };
            let _ = message_tx.send(msg);
        });
    }
}
