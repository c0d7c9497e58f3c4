//! Application-facing client.

use std::sync::Arc;

use rustpush_auth::channel::{self, ChannelAuth};
use rustpush_core::{AppId, ClientConfig, Credentials, PushResult};
use serde_json::Value;

use crate::log::{LogSink, NoopLogSink};
use crate::response::{ChannelInfo, ChannelMap, ResponseEnvelope, TriggerOutcome};
use crate::rest::{RestClient, TriggerParams};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Entry point for publishing events and authorizing channel subscriptions.
///
/// The client is immutable and cheap to clone; credentials, configuration,
/// transport, and log sink are shared. Every call signs a fresh request, so
/// one client can serve many threads at once.
///
/// # Examples
///
/// ```
/// use rustpush_client::PushClient;
/// use rustpush_core::ClientConfig;
///
/// let client = PushClient::new("key", "secret", 42_u64, ClientConfig::default()).unwrap();
/// let token = client.socket_auth("private-orders", "1234.5678", None);
/// assert!(token.auth.starts_with("key:"));
/// ```
#[derive(Debug, Clone)]
pub struct PushClient {
    credentials: Arc<Credentials>,
    rest: RestClient,
}

impl PushClient {
    /// Create a client that talks to the service over HTTP(S).
    ///
    /// # Errors
    ///
    /// Returns [`rustpush_core::PushError::Transport`] if the default HTTP
    /// transport cannot be created.
    pub fn new(
        auth_key: impl Into<String>,
        secret: impl Into<String>,
        app_id: impl Into<AppId>,
        config: ClientConfig,
    ) -> PushResult<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(
            Credentials::new(app_id, auth_key, secret),
            config,
            transport,
        ))
    }

    /// Create a client from `RUSTPUSH_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`rustpush_core::PushError::Config`] if a credential variable
    /// is missing, or a transport error as in [`PushClient::new`].
    pub fn from_env() -> PushResult<Self> {
        let credentials = Credentials::from_env()?;
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(
            credentials,
            ClientConfig::from_env(),
            transport,
        ))
    }

    /// Create a client over an injected transport.
    #[must_use]
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let credentials = Arc::new(credentials);
        let rest = RestClient::new(
            Arc::clone(&credentials),
            Arc::new(config),
            transport,
            Arc::new(NoopLogSink),
        );
        Self { credentials, rest }
    }

    /// The same client, reporting diagnostics to `log_sink`.
    #[must_use]
    pub fn with_log_sink(self, log_sink: Arc<dyn LogSink>) -> Self {
        Self {
            credentials: self.credentials,
            rest: self.rest.with_log_sink(log_sink),
        }
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.rest.config()
    }

    /// The underlying REST client.
    #[must_use]
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Publish `data` as `event` on `channels`.
    ///
    /// # Errors
    ///
    /// See [`RestClient::trigger`].
    pub fn trigger(
        &self,
        channels: &[&str],
        event: &str,
        data: &Value,
    ) -> PushResult<TriggerOutcome> {
        let params = TriggerParams::builder()
            .channels(channels.iter().map(|c| (*c).to_owned()).collect())
            .event(event.to_owned())
            .data(data.clone())
            .build();
        self.rest.trigger(&params)
    }

    /// Publish on a single channel.
    ///
    /// # Errors
    ///
    /// See [`RestClient::trigger`].
    pub fn trigger_one(
        &self,
        channel: &str,
        event: &str,
        data: &Value,
    ) -> PushResult<TriggerOutcome> {
        self.rest.log(&format!(
            "trigger received single channel \"{channel}\", converting to a list"
        ));
        self.trigger(&[channel], event, data)
    }

    /// Publish with every trigger option available.
    ///
    /// # Errors
    ///
    /// See [`RestClient::trigger`].
    pub fn trigger_with(&self, params: &TriggerParams) -> PushResult<TriggerOutcome> {
        self.rest.trigger(params)
    }

    /// Attributes of one channel, or `None` if the service refused.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get_channel_info`].
    pub fn get_channel_info(
        &self,
        channel: &str,
        params: &[(&str, &str)],
    ) -> PushResult<Option<ChannelInfo>> {
        self.rest.get_channel_info(channel, params)
    }

    /// All channels keyed by name, or `None` if the service refused.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get_channels`].
    pub fn get_channels(&self, params: &[(&str, &str)]) -> PushResult<Option<ChannelMap>> {
        self.rest.get_channels(params)
    }

    /// Signed GET of any resource below `/apps/{app_id}`.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get`].
    pub fn get(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> PushResult<Option<ResponseEnvelope>> {
        self.rest.get(resource, params)
    }

    /// Authorize `socket_id` to subscribe to a private channel.
    #[must_use]
    pub fn socket_auth(
        &self,
        channel: &str,
        socket_id: &str,
        custom_data: Option<&str>,
    ) -> ChannelAuth {
        self.rest.log(&format!(
            "socket_auth() creating socket authorization hash for channel [{channel}]"
        ));
        channel::socket_auth(&self.credentials, channel, socket_id, custom_data)
    }

    /// Authorize `socket_id` to join a presence channel as `user_id`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `user_info` cannot be encoded.
    pub fn presence_auth(
        &self,
        channel: &str,
        socket_id: &str,
        user_id: &str,
        user_info: Option<&Value>,
    ) -> PushResult<ChannelAuth> {
        self.rest.log(&format!(
            "presence_auth() creating presence authorization hash for channel [{channel}]"
        ));
        channel::presence_auth(&self.credentials, channel, socket_id, user_id, user_info)
    }
}
