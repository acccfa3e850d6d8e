//! Realtime database adapter.
//!
//! Implements [`CredentialStore`] against the Firebase Realtime Database
//! REST surface, under `users/{uid}/passwords`:
//!
//! - create: `POST …/passwords.json` (the server allocates the key)
//! - update: `PATCH …/passwords/{id}.json`
//! - delete: `DELETE …/passwords/{id}.json` (absent keys delete as 200)
//! - subscribe: streaming `GET …/passwords.json` with
//!   `Accept: text/event-stream`
//!
//! The wire feed is incremental (`put`/`patch` at sub-paths). The trait
//! contract is whole snapshots, so the subscription task keeps its own
//! authoritative JSON tree, applies every wire event to it, and emits a
//! complete decoded snapshot after each change. Consumers never see a
//! partial update.

use std::sync::RwLock;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::error::{StoreError, WriteOp};
use crate::models::{decode_snapshot, CredentialDraft};
use crate::sse::{SseParser, StreamEvent};
use crate::traits::{CredentialStore, StoreEvent, StoreSubscription};

#[derive(Debug, Deserialize)]
struct CreateResponse {
    name: String,
}

/// Credential store over the realtime database REST API.
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl FirebaseStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (timeouts, TLS settings).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    fn collection_url(&self, user_id: &str) -> String {
        format!(
            "{}/users/{}/passwords.json{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id),
            self.auth_query()
        )
    }

    fn record_url(&self, user_id: &str, id: &str) -> String {
        format!(
            "{}/users/{}/passwords/{}.json{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id),
            urlencoding::encode(id),
            self.auth_query()
        )
    }

    fn auth_query(&self) -> String {
        match self.token.read().ok().and_then(|t| t.clone()) {
            Some(token) => format!("?auth={}", urlencoding::encode(&token)),
            None => String::new(),
        }
    }

    fn write_error(op: WriteOp, err: reqwest::Error) -> StoreError {
        StoreError::WriteNetwork {
            op,
            message: err.to_string(),
        }
    }

    async fn check_write(op: WriteOp, response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        tracing::warn!("Store {:?} rejected ({}): {}", op, status, message);
        Err(StoreError::WriteRejected {
            op,
            status,
            message,
        })
    }
}

#[async_trait]
impl CredentialStore for FirebaseStore {
    fn subscribe(
        &self,
        user_id: &str,
        epoch: u64,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> StoreSubscription {
        let url = self.collection_url(user_id);
        let client = self.client.clone();

        let handle = tokio::spawn(async move {
            tracing::info!("Opening credential feed (epoch {})", epoch);
            if let Err(error) = run_feed(client, &url, epoch, &events).await {
                // Receiver may already be gone during teardown; that is fine.
                let _ = events.send(StoreEvent::Failed { epoch, error });
            }
        });

        StoreSubscription::from_task(handle)
    }

    async fn create(&self, user_id: &str, draft: &CredentialDraft) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.collection_url(user_id))
            .json(draft)
            .send()
            .await
            .map_err(|e| Self::write_error(WriteOp::Create, e))?;
        let response = Self::check_write(WriteOp::Create, response).await?;

        let created: CreateResponse = response.json().await.map_err(|e| StoreError::WriteNetwork {
            op: WriteOp::Create,
            message: format!("malformed create response: {}", e),
        })?;
        tracing::debug!("Created credential {}", created.name);
        Ok(created.name)
    }

    async fn update(
        &self,
        user_id: &str,
        id: &str,
        fields: &CredentialDraft,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.record_url(user_id, id))
            .json(fields)
            .send()
            .await
            .map_err(|e| Self::write_error(WriteOp::Update, e))?;
        Self::check_write(WriteOp::Update, response).await?;
        tracing::debug!("Updated credential {}", id);
        Ok(())
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        // Deleting an absent key returns success upstream as well, which
        // gives remove() its idempotence.
        let response = self
            .client
            .delete(self.record_url(user_id, id))
            .send()
            .await
            .map_err(|e| Self::write_error(WriteOp::Delete, e))?;
        Self::check_write(WriteOp::Delete, response).await?;
        tracing::debug!("Deleted credential {}", id);
        Ok(())
    }

    fn set_session_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }
}

/// Drive the streaming request, applying wire events to an authoritative
/// tree and emitting complete snapshots.
async fn run_feed(
    client: reqwest::Client,
    url: &str,
    epoch: u64,
    events: &mpsc::UnboundedSender<StoreEvent>,
) -> Result<(), StoreError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await
        .map_err(|e| StoreError::SubscriptionFailed {
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(StoreError::SubscriptionFailed {
            message: format!("HTTP {}", response.status().as_u16()),
        });
    }

    let mut stream = response.bytes_stream();
    let mut parser = SseParser::new();
    let mut pending = String::new();
    let mut tree = serde_json::Value::Null;

    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|e| StoreError::SubscriptionFailed {
            message: e.to_string(),
        })?;
        pending.push_str(&String::from_utf8_lossy(&bytes));

        while let Some(pos) = pending.find('\n') {
            let line = pending[..pos].trim_end_matches('\r').to_string();
            pending.drain(..=pos);

            let event = match parser.feed_line(&line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Skipping malformed feed event: {}", e);
                    continue;
                }
            };

            match event {
                StreamEvent::Put { path, data } => {
                    apply_put(&mut tree, &path, data);
                }
                StreamEvent::Patch { path, data } => {
                    apply_patch(&mut tree, &path, data);
                }
                StreamEvent::KeepAlive => continue,
                StreamEvent::AuthRevoked => {
                    return Err(StoreError::AuthRevoked);
                }
            }

            let snapshot = StoreEvent::Snapshot {
                epoch,
                records: decode_snapshot(&tree),
            };
            if events.send(snapshot).is_err() {
                // Consumer is gone; stop quietly.
                return Ok(());
            }
        }
    }

    Err(StoreError::SubscriptionFailed {
        message: "stream closed".to_string(),
    })
}

/// Replace the value at `path` ("/" for the root, "/k1/title" for a leaf).
/// A null value removes the key.
fn apply_put(tree: &mut serde_json::Value, path: &str, data: serde_json::Value) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        *tree = data;
        return;
    }

    let mut node = tree;
    for segment in &segments[..segments.len() - 1] {
        if !node.is_object() {
            *node = serde_json::Value::Object(serde_json::Map::new());
        }
        node = node
            .as_object_mut()
            .expect("just coerced to object")
            .entry(segment.to_string())
            .or_insert(serde_json::Value::Null);
    }

    let leaf = segments[segments.len() - 1];
    if !node.is_object() {
        *node = serde_json::Value::Object(serde_json::Map::new());
    }
    let map = node.as_object_mut().expect("just coerced to object");
    if data.is_null() {
        map.remove(leaf);
    } else {
        map.insert(leaf.to_string(), data);
    }
}

/// Merge each child of `data` at `path`.
fn apply_patch(tree: &mut serde_json::Value, path: &str, data: serde_json::Value) {
    let serde_json::Value::Object(children) = data else {
        return;
    };
    let prefix = path.trim_end_matches('/');
    for (key, value) in children {
        let child_path = format!("{}/{}", prefix, key);
        apply_put(tree, &child_path, value);
    }
}
