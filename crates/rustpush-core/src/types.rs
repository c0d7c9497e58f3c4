//! Application identity and endpoint types.

use std::fmt;

use crate::config::ClientConfig;
use crate::error::{PushError, PushResult};

/// Application identifier assigned by the hosted service.
///
/// The service issues numeric identifiers, but they are treated as opaque
/// strings everywhere they are used (URL paths and logs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AppId(String);

impl AppId {
    /// Create a new application identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the application identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for AppId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application credentials: identifier, public key, and secret.
///
/// The secret is only ever used as an HMAC key. It is redacted from the
/// `Debug` output and never placed in URLs or log lines.
#[derive(Clone)]
pub struct Credentials {
    app_id: AppId,
    key: String,
    secret: String,
}

impl Credentials {
    /// Create a new set of credentials.
    #[must_use]
    pub fn new(app_id: impl Into<AppId>, key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Load credentials from `RUSTPUSH_APP_ID`, `RUSTPUSH_KEY` and
    /// `RUSTPUSH_SECRET`.
    ///
    /// # Errors
    /// Returns [`PushError::Config`] naming the first missing variable.
    pub fn from_env() -> PushResult<Self> {
        let app_id = require_env("RUSTPUSH_APP_ID")?;
        let key = require_env("RUSTPUSH_KEY")?;
        let secret = require_env("RUSTPUSH_SECRET")?;
        Ok(Self::new(app_id, key, secret))
    }

    /// The application identifier.
    #[must_use]
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// The public authentication key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The application secret, as bytes for use as an HMAC key.
    #[must_use]
    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn require_env(name: &str) -> PushResult<String> {
    std::env::var(name).map_err(|_| PushError::Config(format!("{name} is not set")))
}

/// URL scheme used to reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    Https,
}

impl Scheme {
    /// The scheme as it appears in a URL.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where REST calls for one application are sent.
///
/// Every resource path is relative to the base path `/apps/{app_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: String,
}

impl Endpoint {
    /// Derive the endpoint for `app_id` from the client configuration.
    #[must_use]
    pub fn new(config: &ClientConfig, app_id: &AppId) -> Self {
        let scheme = if config.secured {
            Scheme::Https
        } else {
            Scheme::Http
        };
        Self {
            scheme,
            host: config.host.clone(),
            port: config.port,
            base_path: format!("/apps/{app_id}"),
        }
    }

    /// The URL scheme.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The service host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The service port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The application base path, `/apps/{app_id}`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Full request path for a resource below the application base path.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustpush_core::{AppId, ClientConfig, Endpoint};
    ///
    /// let endpoint = Endpoint::new(&ClientConfig::default(), &AppId::from(42));
    /// assert_eq!(endpoint.path_for("/events"), "/apps/42/events");
    /// ```
    #[must_use]
    pub fn path_for(&self, resource: &str) -> String {
        format!("{}{resource}", self.base_path)
    }

    /// Absolute URL (without query string) for a full request path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}://{}:{}{path}", self.scheme, self.host, self.port)
    }
}
