//! Mock implementations of the capability traits for testing.

pub mod auth;
pub mod store;

pub use auth::{MockAuthClient, RecordedAuthCall};
pub use store::{MockCredentialStore, RecordedWrite};
