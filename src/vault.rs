//! Credential list sync: the vault view-model.
//!
//! Owns the local mirror of the signed-in user's credential collection.
//! The mirror is a pure projection of the latest snapshot delivered by the
//! live subscription: every snapshot replaces it wholesale, and no local
//! mutation is applied that is not also sent to the store. Creates,
//! updates and deletes become visible only when a later snapshot reflects
//! them.
//!
//! Exactly one subscription is live at a time. Each call to [`subscribe`]
//! cancels the previous feed and bumps an epoch counter; snapshot events
//! are stamped with the epoch of the feed that produced them and are
//! discarded unless they match the current one, so a stale feed (or an
//! event already queued during teardown) can never mutate the mirror.
//!
//! [`subscribe`]: VaultView::subscribe

use tokio::sync::mpsc;

use crate::error::ValidationError;
use crate::models::{CredentialDraft, CredentialRecord};
use crate::traits::{CredentialStore, StoreEvent, StoreSubscription};

/// A detached, editable copy of one selected record.
///
/// Edits land here and are invisible to the rest of the app until `save`
/// commits them through the store.
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    pub id: String,
    pub fields: CredentialDraft,
    pub reveal_secret: bool,
}

/// The vault view-model.
#[derive(Default)]
pub struct VaultView {
    mirror: Vec<CredentialRecord>,
    pub filter_text: String,
    /// The add form.
    pub draft: CredentialDraft,
    pub reveal_draft_secret: bool,
    selected: Option<WorkingCopy>,
    /// Index of the highlighted row within the filtered list.
    pub table_index: usize,
    epoch: u64,
    subscription: Option<StoreSubscription>,
    user_id: Option<String>,
}

impl VaultView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mirror(&self) -> &[CredentialRecord] {
        &self.mirror
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The epoch stamped on events of the current feed.
    pub fn current_epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Open the live feed for `user_id`'s collection.
    ///
    /// Cancels any prior feed first, so at most one subscription is live
    /// per view instance. Safe to call again for the same user.
    pub fn subscribe(
        &mut self,
        user_id: &str,
        store: &dyn CredentialStore,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) {
        self.unsubscribe();
        self.epoch += 1;
        tracing::debug!("Subscribing to {} (epoch {})", user_id, self.epoch);
        self.subscription = Some(store.subscribe(user_id, self.epoch, events));
        self.user_id = Some(user_id.to_string());
    }

    /// Tear the feed down. Guaranteed on view disposal and on the user id
    /// clearing; leaks no background listener.
    pub fn unsubscribe(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.user_id = None;
    }

    /// Drop all session state: feed, mirror, forms, selection.
    pub fn reset(&mut self) {
        self.unsubscribe();
        self.mirror.clear();
        self.filter_text.clear();
        self.draft = CredentialDraft::default();
        self.reveal_draft_secret = false;
        self.selected = None;
        self.table_index = 0;
    }

    /// Apply a snapshot delivered by the feed.
    ///
    /// Replaces the mirror atomically. Returns false (and applies nothing)
    /// for events from a stale epoch or after teardown.
    pub fn apply_snapshot(&mut self, epoch: u64, records: Vec<CredentialRecord>) -> bool {
        if self.subscription.is_none() || epoch != self.epoch {
            tracing::debug!(
                "Discarding stale snapshot (epoch {} != {})",
                epoch,
                self.epoch
            );
            return false;
        }
        self.mirror = records;
        let visible = self.filtered().len();
        self.table_index = self.table_index.min(visible.saturating_sub(1));
        true
    }

    /// Check whether a feed failure belongs to the current subscription.
    /// A true result means the caller should surface it; the mirror is
    /// left as-is either way (failure is "no data", not a crash).
    pub fn feed_event_is_current(&self, epoch: u64) -> bool {
        self.subscription.is_some() && epoch == self.epoch
    }

    /// The displayed subset: records whose title or username contains the
    /// filter text, case-insensitively. Empty filter means no filtering.
    pub fn filtered(&self) -> Vec<&CredentialRecord> {
        if self.filter_text.is_empty() {
            return self.mirror.iter().collect();
        }
        let needle = self.filter_text.to_lowercase();
        self.mirror
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.username.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.table_index = 0;
    }

    /// Validate the add form. All five fields must be non-empty and a
    /// user must be signed in; nothing reaches the store otherwise.
    pub fn validate_add(&self) -> Result<(String, CredentialDraft), ValidationError> {
        if let Some(field) = self.draft.first_missing_field() {
            return Err(ValidationError::MissingField { field });
        }
        let user_id = self.user_id.clone().ok_or(ValidationError::NoUser)?;
        Ok((user_id, self.draft.clone()))
    }

    /// Clear the add form after a successful create request.
    pub fn clear_form(&mut self) {
        self.draft = CredentialDraft::default();
        self.reveal_draft_secret = false;
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.mirror.iter().any(|r| r.id == id)
    }

    /// The record currently highlighted in the filtered table.
    pub fn highlighted(&self) -> Option<&CredentialRecord> {
        self.filtered().into_iter().nth(self.table_index)
    }

    /// Copy the record with `id` into a working copy for editing.
    /// Lookup is by id, never by reference identity.
    pub fn select(&mut self, id: &str) -> bool {
        match self.mirror.iter().find(|r| r.id == id) {
            Some(record) => {
                self.selected = Some(WorkingCopy {
                    id: record.id.clone(),
                    fields: record.clone().into(),
                    reveal_secret: false,
                });
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&WorkingCopy> {
        self.selected.as_ref()
    }

    pub fn selected_mut(&mut self) -> Option<&mut WorkingCopy> {
        self.selected.as_mut()
    }

    /// Discard the working copy unconditionally.
    pub fn close_editor(&mut self) {
        self.selected = None;
    }

    /// Build the update payload for `save`.
    ///
    /// Requires a selection whose id still names a mirror record. Fields
    /// left blank in the editor keep their previous value; the full
    /// five-field record is sent.
    pub fn validate_save(&self) -> Result<(String, String, CredentialDraft), ValidationError> {
        let user_id = self.user_id.clone().ok_or(ValidationError::NoUser)?;
        let copy = self.selected.as_ref().ok_or(ValidationError::UnknownRecord)?;
        let current = self
            .mirror
            .iter()
            .find(|r| r.id == copy.id)
            .ok_or(ValidationError::UnknownRecord)?;

        let pick = |edited: &str, previous: &str| {
            if edited.trim().is_empty() {
                previous.to_string()
            } else {
                edited.to_string()
            }
        };

        let fields = CredentialDraft {
            title: pick(&copy.fields.title, &current.title),
            username: pick(&copy.fields.username, &current.username),
            secret: pick(&copy.fields.secret, &current.secret),
            url: pick(&copy.fields.url, &current.url),
            note: pick(&copy.fields.note, &current.note),
        };
        Ok((user_id, copy.id.clone(), fields))
    }

    /// Build the delete payload for `remove`.
    ///
    /// The mirror check is best-effort only: an id already deleted by
    /// another session still issues the request, and the store treats
    /// delete-of-missing-key as a success no-op.
    pub fn validate_remove(&self, id: &str) -> Result<(String, String), ValidationError> {
        let user_id = self.user_id.clone().ok_or(ValidationError::NoUser)?;
        if !self.contains_id(id) {
            tracing::debug!("remove({}) not in mirror; issuing delete anyway", id);
        }
        Ok((user_id, id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockCredentialStore;

    fn record(id: &str, title: &str, username: &str) -> CredentialRecord {
        CredentialRecord {
            id: id.to_string(),
            title: title.to_string(),
            username: username.to_string(),
            secret: "x".to_string(),
            url: "u".to_string(),
            note: "n".to_string(),
        }
    }

    fn subscribed_vault() -> (VaultView, MockCredentialStore) {
        let store = MockCredentialStore::new();
        let mut vault = VaultView::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        vault.subscribe("u1", &store, tx);
        (vault, store)
    }

    #[test]
    fn test_snapshot_replacement_is_total() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();

        assert!(vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a"), record("k2", "Bank", "b")]));
        assert_eq!(vault.mirror().len(), 2);

        // k1 absent from the next snapshot: nothing of it survives.
        assert!(vault.apply_snapshot(epoch, vec![record("k2", "Bank", "b")]));
        assert_eq!(vault.mirror().len(), 1);
        assert_eq!(vault.mirror()[0].id, "k2");
    }

    #[test]
    fn test_stale_epoch_snapshot_is_discarded() {
        let (mut vault, store) = subscribed_vault();
        let old_epoch = vault.current_epoch();

        let (tx, _rx) = mpsc::unbounded_channel();
        vault.subscribe("u2", &store, tx);
        assert!(!vault.apply_snapshot(old_epoch, vec![record("k1", "Mail", "a")]));
        assert!(vault.mirror().is_empty());

        assert!(vault.apply_snapshot(vault.current_epoch(), vec![record("k9", "New", "c")]));
        assert_eq!(vault.mirror()[0].id, "k9");
    }

    #[test]
    fn test_snapshot_after_unsubscribe_is_discarded() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.unsubscribe();
        assert!(!vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a")]));
        assert!(!vault.feed_event_is_current(epoch));
    }

    #[test]
    fn test_resubscribe_keeps_one_live_subscription() {
        let store = MockCredentialStore::new();
        let mut vault = VaultView::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        vault.subscribe("u1", &store, tx.clone());
        vault.subscribe("u2", &store, tx);
        assert_eq!(store.live_subscriber_count(), 1);
        assert_eq!(vault.user_id(), Some("u2"));
    }

    #[test]
    fn test_no_duplicate_ids_across_snapshots() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        for snapshot in [
            vec![record("k1", "Mail", "a")],
            vec![record("k1", "Mail", "a"), record("k2", "Bank", "b")],
            vec![record("k2", "Bank", "b")],
        ] {
            assert!(vault.apply_snapshot(epoch, snapshot));
            let mut ids: Vec<&str> = vault.mirror().iter().map(|r| r.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), vault.mirror().len());
        }
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a"), record("k2", "Bank", "b")]);
        assert_eq!(vault.filtered().len(), 2);
    }

    #[test]
    fn test_filter_matches_title_or_username_case_insensitive() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(
            epoch,
            vec![
                record("k1", "Mail", "alice@example.com"),
                record("k2", "Bank", "bob@example.com"),
                record("k3", "Forum", "mailman"),
            ],
        );

        vault.filter_text = "MAIL".to_string();
        let ids: Vec<&str> = vault.filtered().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["k1", "k3"]);

        vault.filter_text = "bob".to_string();
        let ids: Vec<&str> = vault.filtered().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["k2"]);

        vault.filter_text = "nothing-matches".to_string();
        assert!(vault.filtered().is_empty());
    }

    #[test]
    fn test_validate_add_rejects_missing_fields() {
        let (mut vault, _store) = subscribed_vault();
        vault.draft = CredentialDraft {
            title: "Mail".to_string(),
            username: "a@b.com".to_string(),
            secret: String::new(),
            url: "mail.com".to_string(),
            note: "n".to_string(),
        };
        assert_eq!(
            vault.validate_add().unwrap_err(),
            ValidationError::MissingField { field: "password" }
        );
    }

    #[test]
    fn test_validate_add_requires_user() {
        let mut vault = VaultView::new();
        vault.draft = CredentialDraft {
            title: "Mail".to_string(),
            username: "a@b.com".to_string(),
            secret: "x".to_string(),
            url: "mail.com".to_string(),
            note: "n".to_string(),
        };
        assert_eq!(vault.validate_add().unwrap_err(), ValidationError::NoUser);
    }

    #[test]
    fn test_select_copies_not_aliases() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a")]);

        assert!(vault.select("k1"));
        vault.selected_mut().unwrap().fields.title = "Changed".to_string();
        // The mirror is untouched until save commits through the store.
        assert_eq!(vault.mirror()[0].title, "Mail");
    }

    #[test]
    fn test_select_unknown_id_fails() {
        let (mut vault, _store) = subscribed_vault();
        assert!(!vault.select("missing"));
        assert!(vault.selected().is_none());
    }

    #[test]
    fn test_save_blank_fields_keep_previous_values() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(epoch, vec![record("k1", "Mail", "alice")]);
        vault.select("k1");
        {
            let copy = vault.selected_mut().unwrap();
            copy.fields.title = "Mailbox".to_string();
            copy.fields.username = String::new();
        }

        let (user, id, fields) = vault.validate_save().unwrap();
        assert_eq!(user, "u1");
        assert_eq!(id, "k1");
        assert_eq!(fields.title, "Mailbox");
        assert_eq!(fields.username, "alice");
    }

    #[test]
    fn test_save_fails_when_record_vanished() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a")]);
        vault.select("k1");
        // Another session deleted it; the next snapshot no longer has it.
        vault.apply_snapshot(epoch, vec![]);
        assert_eq!(
            vault.validate_save().unwrap_err(),
            ValidationError::UnknownRecord
        );
    }

    #[test]
    fn test_close_editor_discards_unconditionally() {
        let (mut vault, _store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a")]);
        vault.select("k1");
        vault.selected_mut().unwrap().fields.note = "edited".to_string();
        vault.close_editor();
        assert!(vault.selected().is_none());
    }

    #[test]
    fn test_remove_tolerates_missing_id() {
        let (vault, _store) = subscribed_vault();
        let (user, id) = vault.validate_remove("never-existed").unwrap();
        assert_eq!(user, "u1");
        assert_eq!(id, "never-existed");
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut vault, store) = subscribed_vault();
        let epoch = vault.current_epoch();
        vault.apply_snapshot(epoch, vec![record("k1", "Mail", "a")]);
        vault.filter_text = "ma".to_string();
        vault.select("k1");
        vault.reset();

        assert!(vault.mirror().is_empty());
        assert!(vault.filter_text.is_empty());
        assert!(vault.selected().is_none());
        assert!(!vault.is_subscribed());
        assert_eq!(store.live_subscriber_count(), 0);
    }
}
