//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which vault component has focus
//! - [`AppMessage`] - Messages for async communication

mod actions;
mod handlers;
mod keys;
mod messages;
mod types;

pub use messages::AppMessage;
pub use types::{AuthMode, Focus, LoginForm, Notice, NoticeKind, Screen};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::session::SessionGate;
use crate::traits::{AuthClient, CredentialStore};
use crate::vault::VaultView;

/// Core application state.
///
/// Owns the session gate and the vault view-model, plus the screen and
/// focus bookkeeping the renderer reads. Async work never touches this
/// struct directly; spawned tasks report back through `message_tx` and
/// all mutation happens in [`App::handle_message`] on the event loop.
pub struct App {
    pub session: SessionGate,
    pub vault: VaultView,
    pub screen: Screen,
    pub focus: Focus,
    pub login: LoginForm,
    pub notice: Option<Notice>,
    /// Focused field index in the add form.
    pub add_field: usize,
    /// Focused field index in the editor modal.
    pub editor_field: usize,
    pub should_quit: bool,
    dirty: bool,
    auth: Arc<dyn AuthClient>,
    store: Arc<dyn CredentialStore>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    pub fn new(
        auth: Arc<dyn AuthClient>,
        store: Arc<dyn CredentialStore>,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            session: SessionGate::new(),
            vault: VaultView::new(),
            screen: Screen::Login,
            focus: Focus::Table,
            login: LoginForm::default(),
            notice: None,
            add_field: 0,
            editor_field: 0,
            should_quit: false,
            dirty: true,
            auth,
            store,
            message_tx,
        }
    }

    /// Mark the app as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Take the dirty flag, clearing it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
