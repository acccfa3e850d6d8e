//! Keyboard handling for the App.
//!
//! One entry point, [`App::handle_key`], dispatched by screen and focus.
//! Key presses only mutate local form state or kick off actions; remote
//! results still arrive through the message channel.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, Focus, Screen};
use crate::models::CredentialDraft;

/// Number of fields in the add form and the editor.
const DRAFT_FIELDS: usize = 5;

fn draft_field_mut(draft: &mut CredentialDraft, index: usize) -> &mut String {
    match index {
        0 => &mut draft.title,
        1 => &mut draft.username,
        2 => &mut draft.secret,
        3 => &mut draft.url,
        _ => &mut draft.note,
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // A visible notice swallows Enter and Esc to dismiss.
        if self.notice.is_some() && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.dismiss_notice();
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Vault => self.handle_vault_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if self.login.busy {
            return;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.quit(),
            (KeyCode::Enter, _) => self.submit_login(),
            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.login.focus_next(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.login.focus_prev(),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => self.login.toggle_mode(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.login.reveal_password = !self.login.reveal_password;
            }
            (KeyCode::Backspace, _) => {
                self.login.focused_value_mut().pop();
            }
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                self.login.focused_value_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_vault_key(&mut self, key: KeyEvent) {
        if self.vault.selected().is_some() {
            self.handle_editor_key(key);
            return;
        }
        match self.focus {
            Focus::Table => self.handle_table_key(key),
            Focus::Filter => self.handle_filter_key(key),
            Focus::AddForm => self.handle_add_form_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => self.quit(),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => self.sign_out(),
            (KeyCode::Char('/'), _) => self.focus = Focus::Filter,
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                self.focus = Focus::AddForm;
                self.add_field = 0;
            }
            (KeyCode::Up, _) => {
                self.vault.table_index = self.vault.table_index.saturating_sub(1);
            }
            (KeyCode::Down, _) => {
                let last = self.vault.filtered().len().saturating_sub(1);
                self.vault.table_index = (self.vault.table_index + 1).min(last);
            }
            (KeyCode::Enter, _) => {
                if let Some(id) = self.vault.highlighted().map(|r| r.id.clone()) {
                    self.vault.select(&id);
                    self.editor_field = 0;
                }
            }
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
                self.delete_highlighted();
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.vault.clear_filter();
                self.focus = Focus::Table;
            }
            KeyCode::Enter | KeyCode::Tab => self.focus = Focus::Table,
            KeyCode::Backspace => {
                self.vault.filter_text.pop();
                self.vault.table_index = 0;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.vault.filter_text.push(c);
                self.vault.table_index = 0;
            }
            _ => {}
        }
    }

    fn handle_add_form_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.focus = Focus::Table,
            (KeyCode::Enter, _) => self.submit_add(),
            (KeyCode::Tab, _) => self.add_field = (self.add_field + 1) % DRAFT_FIELDS,
            (KeyCode::BackTab, _) => {
                self.add_field = (self.add_field + DRAFT_FIELDS - 1) % DRAFT_FIELDS;
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.vault.reveal_draft_secret = !self.vault.reveal_draft_secret;
            }
            (KeyCode::Backspace, _) => {
                draft_field_mut(&mut self.vault.draft, self.add_field).pop();
            }
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                draft_field_mut(&mut self.vault.draft, self.add_field).push(c);
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.vault.close_editor(),
            (KeyCode::Enter, _) => self.submit_save(),
            (KeyCode::Tab, _) => self.editor_field = (self.editor_field + 1) % DRAFT_FIELDS,
            (KeyCode::BackTab, _) => {
                self.editor_field = (self.editor_field + DRAFT_FIELDS - 1) % DRAFT_FIELDS;
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if let Some(copy) = self.vault.selected_mut() {
                    copy.reveal_secret = !copy.reveal_secret;
                }
            }
            // Plain chars edit the focused field, so delete takes a modifier.
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                if let Some(id) = self.vault.selected().map(|c| c.id.clone()) {
                    self.vault.close_editor();
                    self.delete_record(&id);
                }
            }
            (KeyCode::Backspace, _) => {
                let field = self.editor_field;
                if let Some(copy) = self.vault.selected_mut() {
                    draft_field_mut(&mut copy.fields, field).pop();
                }
            }
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                let field = self.editor_field;
                if let Some(copy) = self.vault.selected_mut() {
                    draft_field_mut(&mut copy.fields, field).push(c);
                }
            }
            _ => {}
        }
    }
}
