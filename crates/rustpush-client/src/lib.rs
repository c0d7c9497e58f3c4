//! Signed REST client and channel authorizer for a hosted publish/subscribe
//! service.
//!
//! [`PushClient`] is the entry point. It publishes events to channels and
//! queries channel state through signed REST calls, and it issues the
//! authorization tokens that let end-user connections join private and
//! presence channels without learning the application secret.
//!
//! # Usage
//!
//! ```no_run
//! use rustpush_client::PushClient;
//! use rustpush_core::ClientConfig;
//! use serde_json::json;
//!
//! let client = PushClient::new("key", "secret", 42_u64, ClientConfig::default())?;
//! let outcome = client.trigger(&["my-channel"], "my-event", &json!({"message": "hello"}))?;
//! assert!(outcome.is_success());
//! # Ok::<(), rustpush_core::PushError>(())
//! ```
//!
//! # Modules
//!
//! - [`client`] - The application-facing [`PushClient`]
//! - [`rest`] - Request signing pipeline and response interpretation
//! - [`response`] - Response envelopes, trigger outcomes, channel attributes
//! - [`transport`] - The injectable HTTP capability and its `reqwest` default
//! - [`log`] - The injectable log sink capability

pub mod client;
pub mod log;
pub mod response;
pub mod rest;
pub mod transport;

#[cfg(test)]
mod mock;

pub use client::PushClient;
pub use log::{LogSink, NoopLogSink, TracingLogSink};
pub use response::{ChannelInfo, ChannelMap, ResponseEnvelope, TriggerOutcome};
pub use rest::{RestClient, TriggerParams};
pub use rustpush_auth::ChannelAuth;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Library version, sent in the `User-Agent` of the default transport.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
