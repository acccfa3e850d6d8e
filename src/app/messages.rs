//! AppMessage enum for async communication within the application.

use crate::error::{AuthError, StoreError};
use crate::traits::{AuthSession, StoreEvent};

/// Messages received from async operations (auth requests, the store
/// feed, write completions)
#[derive(Debug)]
pub enum AppMessage {
    /// Sign-in resolved successfully
    SignedIn(AuthSession),
    /// Sign-in was rejected
    SignInFailed(AuthError),
    /// Registration resolved successfully; the account is signed in
    Registered(AuthSession),
    /// Registration was rejected
    RegisterFailed(AuthError),
    /// An event from the live credential feed
    Store(StoreEvent),
    /// A create write was accepted; `id` is the server-assigned key.
    /// Write results carry the user they were issued for, so a result
    /// from a previous account can be told apart and dropped.
    CreateCompleted { user_id: String, id: String },
    /// A create write failed
    CreateFailed { user_id: String, error: StoreError },
    /// An update write was accepted
    UpdateCompleted { user_id: String, id: String },
    /// An update write failed
    UpdateFailed { user_id: String, error: StoreError },
    /// A delete write was accepted (including delete of a missing key)
    DeleteCompleted { user_id: String, id: String },
    /// A delete write failed
    DeleteFailed { user_id: String, error: StoreError },
}
