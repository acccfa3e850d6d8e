//! Message handling for the App.

use super::{App, AppMessage, Notice, Screen};
use crate::error::KeeperError;
use crate::traits::StoreEvent;

impl App {
    /// Surface an error on the notice line, forcing re-auth when the
    /// session can no longer be trusted.
    fn report_error(&mut self, error: impl Into<KeeperError>) {
        let error = error.into();
        tracing::error!("{} ({})", error, error.error_code());
        if error.requires_reauth() && self.session.is_authenticated() {
            self.sign_out();
        }
        self.set_notice(Notice::error(error.user_message()));
    }

    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::SignedIn(session) | AppMessage::Registered(session) => {
                self.store.set_session_token(Some(session.id_token.clone()));
                self.session.resolve(Some(session));
                self.login.clear();
                self.notice = None;
                self.screen = Screen::Vault;
                self.subscribe_vault();
            }
            AppMessage::SignInFailed(e) | AppMessage::RegisterFailed(e) => {
                self.login.busy = false;
                self.session.resolve(None);
                self.report_error(e);
            }
            AppMessage::Store(StoreEvent::Snapshot { epoch, records }) => {
                if self.vault.apply_snapshot(epoch, records) {
                    tracing::debug!("Mirror now holds {} records", self.vault.mirror().len());
                }
            }
            AppMessage::Store(StoreEvent::Failed { epoch, error }) => {
                if !self.vault.feed_event_is_current(epoch) {
                    tracing::debug!("Ignoring failure from stale feed (epoch {})", epoch);
                    return;
                }
                self.report_error(error);
            }
            // A write result only belongs to the session that issued it.
            // After sign-out or an account switch, the forms it would
            // touch belong to someone else, so it is dropped.
            AppMessage::CreateCompleted { ref user_id, .. }
            | AppMessage::UpdateCompleted { ref user_id, .. }
            | AppMessage::DeleteCompleted { ref user_id, .. }
            | AppMessage::CreateFailed { ref user_id, .. }
            | AppMessage::UpdateFailed { ref user_id, .. }
            | AppMessage::DeleteFailed { ref user_id, .. }
                if self.session.user_id() != Some(user_id.as_str()) =>
            {
                tracing::debug!("Dropping a write result issued for {}", user_id);
            }
            AppMessage::CreateCompleted { id, .. } => {
                tracing::info!("Created credential {}", id);
                self.vault.clear_form();
                self.add_field = 0;
                self.set_notice(Notice::success("Entry added."));
            }
            AppMessage::UpdateCompleted { id, .. } => {
                tracing::info!("Updated credential {}", id);
                self.vault.close_editor();
                self.set_notice(Notice::success("Entry updated."));
            }
            AppMessage::DeleteCompleted { id, .. } => {
                tracing::info!("Deleted credential {}", id);
            }
            AppMessage::CreateFailed { error, .. }
            | AppMessage::UpdateFailed { error, .. }
            | AppMessage::DeleteFailed { error, .. } => {
                self.report_error(error);
            }
        }
    }
}
