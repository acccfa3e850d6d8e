//! Mock credential store for testing.
//!
//! Keeps an in-memory collection per user, records every write, and lets
//! tests inject failures and decide exactly when snapshots are delivered.
//! Writes never push a snapshot on their own; tests call
//! [`MockCredentialStore::push_snapshot`] to model the eventually
//! consistent feed.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::StoreError;
use crate::models::{CredentialDraft, CredentialRecord};
use crate::traits::{CredentialStore, StoreEvent, StoreSubscription};

/// A recorded write for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedWrite {
    Create { user_id: String, draft: CredentialDraft },
    Update { user_id: String, id: String, fields: CredentialDraft },
    Delete { user_id: String, id: String },
}

struct Subscriber {
    user_id: String,
    epoch: u64,
    events: mpsc::UnboundedSender<StoreEvent>,
    cancelled: Arc<AtomicBool>,
}

#[derive(Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, CredentialDraft>>,
    subscribers: Vec<Subscriber>,
    next_key: u64,
    create_error: Option<StoreError>,
    update_error: Option<StoreError>,
    delete_error: Option<StoreError>,
    writes: Vec<RecordedWrite>,
    token: Option<String>,
}

impl Inner {
    fn records_for(&self, user_id: &str) -> Vec<CredentialRecord> {
        self.collections
            .get(user_id)
            .map(|collection| {
                collection
                    .iter()
                    .map(|(id, draft)| CredentialRecord::new(id.clone(), draft.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// In-memory credential store.
#[derive(Clone, Default)]
pub struct MockCredentialStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing create (no id allocation).
    pub fn seed(&self, user_id: &str, id: &str, draft: CredentialDraft) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .collections
            .entry(user_id.to_string())
            .or_default()
            .insert(id.to_string(), draft);
    }

    /// Deliver the current state of `user_id`'s collection to every live
    /// subscriber for that user, stamped with the subscriber's own epoch.
    pub fn push_snapshot(&self, user_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        let records = inner.records_for(user_id);
        inner.subscribers.retain(|sub| {
            if sub.cancelled.load(Ordering::SeqCst) {
                return false;
            }
            if sub.user_id != user_id {
                return true;
            }
            sub.events
                .send(StoreEvent::Snapshot {
                    epoch: sub.epoch,
                    records: records.clone(),
                })
                .is_ok()
        });
    }

    /// Deliver a feed failure to every live subscriber for `user_id`.
    pub fn push_failure(&self, user_id: &str, error: StoreError) {
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.retain(|sub| {
            if sub.cancelled.load(Ordering::SeqCst) {
                return false;
            }
            if sub.user_id != user_id {
                return true;
            }
            sub.events
                .send(StoreEvent::Failed {
                    epoch: sub.epoch,
                    error: error.clone(),
                })
                .is_ok()
        });
    }

    pub fn fail_create(&self, error: StoreError) {
        self.inner.lock().unwrap().create_error = Some(error);
    }

    pub fn fail_update(&self, error: StoreError) {
        self.inner.lock().unwrap().update_error = Some(error);
    }

    pub fn fail_delete(&self, error: StoreError) {
        self.inner.lock().unwrap().delete_error = Some(error);
    }

    /// All writes made so far, in order.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.inner.lock().unwrap().writes.clone()
    }

    /// Current records for a user, in key order.
    pub fn records(&self, user_id: &str) -> Vec<CredentialRecord> {
        self.inner.lock().unwrap().records_for(user_id)
    }

    /// Number of subscriptions that have not been cancelled.
    pub fn live_subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .subscribers
            .iter()
            .filter(|sub| !sub.cancelled.load(Ordering::SeqCst))
            .count()
    }

    /// The session token most recently attached.
    pub fn session_token(&self) -> Option<String> {
        self.inner.lock().unwrap().token.clone()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    fn subscribe(
        &self,
        user_id: &str,
        epoch: u64,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> StoreSubscription {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber {
            user_id: user_id.to_string(),
            epoch,
            events,
            cancelled: cancelled.clone(),
        });
        StoreSubscription::from_flag(cancelled)
    }

    async fn create(&self, user_id: &str, draft: &CredentialDraft) -> Result<String, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes.push(RecordedWrite::Create {
            user_id: user_id.to_string(),
            draft: draft.clone(),
        });
        if let Some(error) = inner.create_error.clone() {
            return Err(error);
        }
        inner.next_key += 1;
        let id = format!("k{}", inner.next_key);
        inner
            .collections
            .entry(user_id.to_string())
            .or_default()
            .insert(id.clone(), draft.clone());
        Ok(id)
    }

    async fn update(
        &self,
        user_id: &str,
        id: &str,
        fields: &CredentialDraft,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes.push(RecordedWrite::Update {
            user_id: user_id.to_string(),
            id: id.to_string(),
            fields: fields.clone(),
        });
        if let Some(error) = inner.update_error.clone() {
            return Err(error);
        }
        inner
            .collections
            .entry(user_id.to_string())
            .or_default()
            .insert(id.to_string(), fields.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.writes.push(RecordedWrite::Delete {
            user_id: user_id.to_string(),
            id: id.to_string(),
        });
        if let Some(error) = inner.delete_error.clone() {
            return Err(error);
        }
        // Deleting an absent key is a success no-op.
        if let Some(collection) = inner.collections.get_mut(user_id) {
            collection.remove(id);
        }
        Ok(())
    }

    fn set_session_token(&self, token: Option<String>) {
        self.inner.lock().unwrap().token = token;
    }
}
