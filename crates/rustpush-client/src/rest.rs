//! Signed REST calls.
//!
//! Every call follows the same stateless pipeline:
//!
//! 1. Build the [`CanonicalRequest`] (auth fields, caller parameters, and the
//!    body digest for POSTs) with a fresh `auth_timestamp`.
//! 2. Sign it with the application secret.
//! 3. Hand the method, URL, signed query parameters, and body to the
//!    injected [`HttpTransport`].
//! 4. Interpret the status code.
//!
//! Read operations report non-200 responses as `Ok(None)` rather than as
//! errors. `Err` is reserved for requests that were rejected before sending
//! (too many channels) or never got a response (transport failure).

use std::sync::Arc;

use http::Method;
use rustpush_auth::canonical::{CanonicalRequest, validate_channel_count};
use rustpush_auth::signer::SignedRequest;
use rustpush_core::{ClientConfig, Credentials, Endpoint, PushResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

use crate::log::{LOG_PREFIX, LogSink};
use crate::response::{
    ChannelInfo, ChannelMap, ChannelsListing, ResponseEnvelope, TriggerOutcome,
};
use crate::transport::{HttpRequest, HttpTransport};

/// Parameters of an event trigger.
///
/// # Examples
///
/// ```
/// use rustpush_client::TriggerParams;
/// use serde_json::json;
///
/// let params = TriggerParams::builder()
///     .channels(vec!["my-channel".to_owned()])
///     .event("my-event".into())
///     .data(json!({"message": "hello"}))
///     .build();
/// assert!(!params.debug);
/// assert!(params.socket_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct TriggerParams {
    /// Channels to publish on, at most 100.
    pub channels: Vec<String>,
    /// Event name.
    pub event: String,
    /// Event payload.
    ///
    /// Serialized to a JSON string unless `already_encoded` is set, in which
    /// case it is placed in the request body unchanged.
    pub data: Value,
    /// Connection to exclude from delivery, usually the sender.
    #[builder(default, setter(strip_option))]
    pub socket_id: Option<String>,
    /// Return the full response envelope for this call.
    #[builder(default = false)]
    pub debug: bool,
    /// `data` already holds the serialized payload.
    #[builder(default = false)]
    pub already_encoded: bool,
}

/// JSON body of `POST /events`. Field order is the serialized order.
#[derive(Debug, Serialize)]
struct EventBody<'a> {
    name: &'a str,
    data: Value,
    channels: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    socket_id: Option<&'a str>,
}

/// Signs and sends REST calls for one application.
#[derive(Debug, Clone)]
pub struct RestClient {
    credentials: Arc<Credentials>,
    config: Arc<ClientConfig>,
    endpoint: Endpoint,
    transport: Arc<dyn HttpTransport>,
    log_sink: Arc<dyn LogSink>,
}

impl RestClient {
    /// Create a client over an explicit transport and log sink.
    #[must_use]
    pub fn new(
        credentials: Arc<Credentials>,
        config: Arc<ClientConfig>,
        transport: Arc<dyn HttpTransport>,
        log_sink: Arc<dyn LogSink>,
    ) -> Self {
        let endpoint = Endpoint::new(&config, credentials.app_id());
        Self {
            credentials,
            config,
            endpoint,
            transport,
            log_sink,
        }
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The same client, reporting to a different log sink.
    #[must_use]
    pub fn with_log_sink(mut self, log_sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    /// Publish an event on one or more channels.
    ///
    /// Returns [`TriggerOutcome::Flag`] unless debug mode is active for this
    /// call or for the whole client, in which case the full response is
    /// returned as [`TriggerOutcome::Debug`].
    ///
    /// # Errors
    ///
    /// Returns [`rustpush_core::PushError::TooManyChannels`] without sending
    /// anything when more than 100 channels are given, and
    /// [`rustpush_core::PushError::Transport`] when no response was received.
    pub fn trigger(&self, params: &TriggerParams) -> PushResult<TriggerOutcome> {
        validate_channel_count(params.channels.len())?;

        let data = if params.already_encoded {
            params.data.clone()
        } else {
            Value::String(serde_json::to_string(&params.data)?)
        };
        let body = serde_json::to_string(&EventBody {
            name: &params.event,
            data,
            channels: &params.channels,
            socket_id: params.socket_id.as_deref(),
        })?;

        let path = self.endpoint.path_for("/events");
        let canonical = self
            .canonical(&Method::POST, &path)
            .with_body(body.as_bytes());

        self.log(&format!("trigger POST: {body}"));

        let envelope = self.send(Method::POST, &path, canonical, Some(body))?;

        if params.debug || self.config.debug {
            return Ok(TriggerOutcome::Debug(envelope));
        }
        if !envelope.is_ok() {
            warn!(
                status = envelope.status,
                event = %params.event,
                "Event trigger rejected"
            );
        }
        Ok(TriggerOutcome::Flag(envelope.is_ok()))
    }

    /// Fetch the attributes of one channel.
    ///
    /// Returns `Ok(None)` for any non-200 response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when a 200 body is not a
    /// channel object.
    pub fn get_channel_info(
        &self,
        channel: &str,
        params: &[(&str, &str)],
    ) -> PushResult<Option<ChannelInfo>> {
        let Some(envelope) = self.get(&format!("/channels/{channel}"), params)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&envelope.body)?))
    }

    /// List channels, keyed by name.
    ///
    /// The service wraps the listing in a `channels` object; the wrapper is
    /// removed so callers receive the name to attributes mapping directly.
    /// Returns `Ok(None)` for any non-200 response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when a 200 body is not a
    /// channel listing.
    pub fn get_channels(&self, params: &[(&str, &str)]) -> PushResult<Option<ChannelMap>> {
        let Some(envelope) = self.get("/channels", params)? else {
            return Ok(None);
        };
        let listing: ChannelsListing = serde_json::from_str(&envelope.body)?;
        Ok(Some(listing.channels))
    }

    /// Signed GET of any resource below `/apps/{app_id}`.
    ///
    /// A query string embedded in `resource` is moved into the signed
    /// parameters; on a key collision the entry in `params` wins.
    ///
    /// Returns the full envelope for a 200 response and `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`rustpush_core::PushError::Transport`] when no response was
    /// received.
    pub fn get(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> PushResult<Option<ResponseEnvelope>> {
        let (resource, embedded) = match resource.split_once('?') {
            Some((resource, query)) => (
                resource,
                form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect::<Vec<_>>(),
            ),
            None => (resource, Vec::new()),
        };
        let path = self.endpoint.path_for(resource);
        let canonical = self
            .canonical(&Method::GET, &path)
            .with_params(params.iter().copied())
            .with_params(embedded);

        let envelope = self.send(Method::GET, &path, canonical, None)?;
        if envelope.is_ok() {
            Ok(Some(envelope))
        } else {
            debug!(status = envelope.status, path = %path, "GET returned non-200 status");
            Ok(None)
        }
    }

    /// Start a canonical request stamped with the current time.
    fn canonical(&self, method: &Method, path: &str) -> CanonicalRequest {
        CanonicalRequest::new(
            method.as_str(),
            path,
            self.credentials.key(),
            chrono::Utc::now().timestamp(),
        )
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        canonical: CanonicalRequest,
        body: Option<String>,
    ) -> PushResult<ResponseEnvelope> {
        let signed = SignedRequest::sign(canonical, self.credentials.secret());
        let request = HttpRequest {
            method,
            url: self.endpoint.url_for(path),
            query: signed.query_pairs(),
            body,
            timeout: self.config.timeout(),
        };

        let response = self.transport.send(request)?;
        Ok(ResponseEnvelope::from(response))
    }

    pub(crate) fn log(&self, message: &str) {
        self.log_sink.log(&format!("{LOG_PREFIX}{message}"));
    }
}
