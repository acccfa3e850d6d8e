//! Concrete implementations of the capability traits.
//!
//! Production adapters speak the Firebase REST surface:
//!
//! - [`FirebaseAuth`] - email/password sign-in and sign-up against the
//!   Identity Toolkit API
//! - [`FirebaseStore`] - the realtime database: REST writes plus a
//!   streaming SSE subscription for the live feed
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockAuthClient`] - scripted sign-in/sign-up outcomes
//! - [`mock::MockCredentialStore`] - in-memory collection with recorded
//!   calls, failure injection, and manual snapshot push

pub mod firebase_auth;
pub mod firebase_store;
pub mod mock;

pub use firebase_auth::FirebaseAuth;
pub use firebase_store::FirebaseStore;
pub use mock::{MockAuthClient, MockCredentialStore};
