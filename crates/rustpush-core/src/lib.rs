//! Core types, configuration, and error handling for RustPush.
//!
//! This crate provides the immutable building blocks shared by the signing
//! and REST client crates: application credentials, endpoint configuration,
//! client configuration with per-key defaults, and the common error type.

mod config;
mod error;
mod types;

pub use config::ClientConfig;
pub use error::{MAX_TRIGGER_CHANNELS, PushError, PushResult};
pub use types::{AppId, Credentials, Endpoint, Scheme};
