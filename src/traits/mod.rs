//! Trait abstractions for the external capabilities.
//!
//! The client owns no network behavior of its own; authentication and the
//! credential store are consumed through these traits, enabling dependency
//! injection and mocking in tests.
//!
//! # Traits
//!
//! - [`AuthClient`] - sign in, sign up, sign out
//! - [`CredentialStore`] - per-user credential collection: live subscribe
//!   plus create/update/delete

pub mod auth;
pub mod store;

pub use auth::{AuthClient, AuthSession};
pub use store::{CredentialStore, StoreEvent, StoreSubscription};
