//! KeyCuddle TUI - a terminal client for the KeyCuddle password keeper
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod traits;
pub mod ui;
pub mod vault;
