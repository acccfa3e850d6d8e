//! Remote store error types.
//!
//! Covers rejected writes and live-feed failures. A feed failure is "no
//! data", never a crash: the view keeps its last mirror (or an empty one)
//! and shows a notice.

use std::fmt;

/// Which write operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update,
    Delete,
}

impl WriteOp {
    fn verb(&self) -> &'static str {
        match self {
            WriteOp::Create => "save",
            WriteOp::Update => "update",
            WriteOp::Delete => "delete",
        }
    }
}

/// Store-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A create/update/delete was rejected by the backend.
    WriteRejected {
        op: WriteOp,
        status: u16,
        message: String,
    },

    /// The backend could not be reached for a write.
    WriteNetwork { op: WriteOp, message: String },

    /// The live subscription feed failed or closed unexpectedly.
    SubscriptionFailed { message: String },

    /// The feed reported the auth token is no longer valid.
    AuthRevoked,
}

impl StoreError {
    /// Check if this error means the session must be re-established.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            StoreError::AuthRevoked | StoreError::WriteRejected { status: 401, .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::WriteRejected { op, .. } => {
                format!("Could not {} the entry. Please try again.", op.verb())
            }
            StoreError::WriteNetwork { op, .. } => {
                format!(
                    "Could not reach the server to {} the entry. Check your connection.",
                    op.verb()
                )
            }
            StoreError::SubscriptionFailed { .. } => {
                "Live updates are unavailable. Showing the last known list.".to_string()
            }
            StoreError::AuthRevoked => {
                "Your session has expired. Please sign in again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::WriteRejected { op: WriteOp::Create, .. } => "E_STORE_CREATE",
            StoreError::WriteRejected { op: WriteOp::Update, .. } => "E_STORE_UPDATE",
            StoreError::WriteRejected { op: WriteOp::Delete, .. } => "E_STORE_DELETE",
            StoreError::WriteNetwork { .. } => "E_STORE_NET",
            StoreError::SubscriptionFailed { .. } => "E_STORE_FEED",
            StoreError::AuthRevoked => "E_STORE_AUTH",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::WriteRejected { op, status, message } => {
                write!(f, "Store {} rejected ({}): {}", op.verb(), status, message)
            }
            StoreError::WriteNetwork { op, message } => {
                write!(f, "Store {} failed: {}", op.verb(), message)
            }
            StoreError::SubscriptionFailed { message } => {
                write!(f, "Subscription failed: {}", message)
            }
            StoreError::AuthRevoked => write!(f, "Store auth revoked"),
        }
    }
}

impl std::error::Error for StoreError {}
