//! Credential store capability trait.
//!
//! The store is an opaque remote collection keyed per user. Reads arrive
//! exclusively through a live subscription that delivers complete
//! snapshots; writes are independent requests whose effects show up in a
//! later snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::StoreError;
use crate::models::{CredentialDraft, CredentialRecord};

/// Events delivered by a live subscription.
///
/// Every event is stamped with the epoch captured when the subscription
/// was opened; consumers drop events whose epoch is no longer current, so
/// a stale feed can never mutate the mirror.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A complete snapshot of the user's collection.
    Snapshot {
        epoch: u64,
        records: Vec<CredentialRecord>,
    },
    /// The feed failed. Treated as "no data", not a crash.
    Failed { epoch: u64, error: StoreError },
}

/// Handle for an open subscription.
///
/// Cancelling (or dropping) the handle tears the feed down: the background
/// task is aborted and the shared flag lets synchronous implementations
/// stop delivering. Exactly one subscription is live per component at any
/// time; callers cancel the old handle before opening a new one.
#[derive(Debug)]
pub struct StoreSubscription {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StoreSubscription {
    /// A subscription backed by a spawned task.
    pub fn from_task(handle: JoinHandle<()>) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            handle: Some(handle),
        }
    }

    /// A subscription backed only by a cancellation flag (no task).
    pub fn from_flag(cancelled: Arc<AtomicBool>) -> Self {
        Self {
            cancelled,
            handle: None,
        }
    }

    /// The flag implementations may poll before delivering an event.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Tear the subscription down. Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Trait for the remote credential store.
///
/// Paths are scoped under the authenticated user; implementations resolve
/// `user_id` to the user's collection. `delete` of an id that is already
/// absent resolves as success.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Open a live subscription to the user's collection.
    ///
    /// Snapshots and failures are delivered over `events`, each stamped
    /// with `epoch`. The returned handle must be kept alive; cancelling or
    /// dropping it guarantees no further events for that epoch are sent.
    fn subscribe(
        &self,
        user_id: &str,
        epoch: u64,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> StoreSubscription;

    /// Persist a new record; the store allocates and returns its id.
    async fn create(&self, user_id: &str, draft: &CredentialDraft) -> Result<String, StoreError>;

    /// Replace the fields of an existing record.
    async fn update(
        &self,
        user_id: &str,
        id: &str,
        fields: &CredentialDraft,
    ) -> Result<(), StoreError>;

    /// Delete a record by id. Success if the id was already absent.
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), StoreError>;

    /// Attach (or clear) the session credential used for requests.
    fn set_session_token(&self, token: Option<String>);
}
