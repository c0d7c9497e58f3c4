//! Client configuration.
//!
//! Every key has a default; any key a caller supplies overrides only that
//! key. The same rule applies to the builder, to deserialized documents,
//! and to environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default service host.
const DEFAULT_HOST: &str = "api.pusherapp.com";

/// RustPush client configuration.
///
/// # Examples
///
/// ```
/// use rustpush_core::ClientConfig;
///
/// let config = ClientConfig::builder().host("x".into()).port(1).build();
/// assert!(!config.debug);
/// assert!(config.secured);
/// assert_eq!(config.timeout, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct ClientConfig {
    /// Return full response envelopes from `trigger` instead of booleans.
    #[builder(default = false)]
    pub debug: bool,

    /// Service host name.
    #[builder(default = String::from(DEFAULT_HOST))]
    pub host: String,

    /// Use `https` instead of `http`.
    #[builder(default = true)]
    pub secured: bool,

    /// Service port.
    #[builder(default = 80)]
    pub port: u16,

    /// Per-request timeout in seconds, handed to the transport.
    #[builder(default = 30)]
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: false,
            host: String::from(DEFAULT_HOST),
            secured: true,
            port: 80,
            timeout: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `RUSTPUSH_DEBUG` | `false` |
    /// | `RUSTPUSH_HOST` | `api.pusherapp.com` |
    /// | `RUSTPUSH_SECURED` | `true` |
    /// | `RUSTPUSH_PORT` | `80` |
    /// | `RUSTPUSH_TIMEOUT` | `30` |
    ///
    /// Unparsable numeric values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a configuration from a variable lookup, as [`Self::from_env`]
    /// does for the process environment.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = var("RUSTPUSH_DEBUG") {
            config.debug = parse_bool(&v);
        }
        if let Some(v) = var("RUSTPUSH_HOST") {
            config.host = v;
        }
        if let Some(v) = var("RUSTPUSH_SECURED") {
            config.secured = parse_bool(&v);
        }
        if let Some(v) = var("RUSTPUSH_PORT") {
            if let Ok(n) = v.parse::<u16>() {
                config.port = n;
            }
        }
        if let Some(v) = var("RUSTPUSH_TIMEOUT") {
            if let Ok(n) = v.parse::<u64>() {
                config.timeout = n;
            }
        }

        config
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
