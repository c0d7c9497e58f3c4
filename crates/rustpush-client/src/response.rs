//! Results returned by the REST client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::transport::HttpResponse;

/// Full record of one REST exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// The body decoded as JSON, when it is valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl ResponseEnvelope {
    /// Whether the service answered `200 OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

impl From<HttpResponse> for ResponseEnvelope {
    fn from(response: HttpResponse) -> Self {
        let result = serde_json::from_str(&response.body).ok();
        Self {
            status: response.status.as_u16(),
            body: response.body,
            result,
        }
    }
}

/// Outcome of triggering an event.
///
/// Outside debug mode the caller only learns whether the service accepted
/// the event. In debug mode the whole exchange is returned, whatever its
/// status.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// `true` for `200 OK`, `false` for any other status.
    Flag(bool),
    /// Debug mode was active: the full response.
    Debug(ResponseEnvelope),
}

impl TriggerOutcome {
    /// Whether the service accepted the event.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Flag(accepted) => *accepted,
            Self::Debug(envelope) => envelope.is_ok(),
        }
    }

    /// The response envelope, when debug mode was active.
    #[must_use]
    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::Flag(_) => None,
            Self::Debug(envelope) => Some(envelope),
        }
    }
}

/// Attributes of one channel.
///
/// Which attributes are filled depends on the `info` query parameter and the
/// channel type. Attributes this type does not name are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Whether the channel currently has subscribers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,
    /// Distinct users on a presence channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
    /// Connections subscribed to the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_count: Option<u64>,
    /// Any other attribute returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Channel name to channel attributes.
pub type ChannelMap = BTreeMap<String, ChannelInfo>;

/// Wire shape of the channel listing.
#[derive(Debug, Deserialize)]
pub(crate) struct ChannelsListing {
    #[serde(default)]
    pub(crate) channels: ChannelMap,
}
