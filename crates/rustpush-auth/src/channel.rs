//! Private and presence channel authorization.
//!
//! A subscribing client sends its socket id and the channel name to the
//! application server, which answers with a token signed by the application
//! secret. The message signed is fixed:
//!
//! ```text
//! socket_id:channel               (private channels)
//! socket_id:channel:channel_data  (presence channels, or any custom data)
//! ```
//!
//! `channel_data` is included verbatim, so the bytes returned to the client
//! must be exactly the bytes that were signed.

use rustpush_core::{Credentials, PushResult};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::signer::sign;

/// Authorization payload handed back to a subscribing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelAuth {
    /// `"{auth_key}:{hex signature}"`.
    pub auth: String,
    /// Serialized custom data that was covered by the signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<String>,
}

impl ChannelAuth {
    /// Render the payload as the JSON object expected by client libraries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustpush_auth::channel::ChannelAuth;
    ///
    /// let auth = ChannelAuth { auth: "key:abc".to_owned(), channel_data: None };
    /// assert_eq!(auth.to_json().unwrap(), r#"{"auth":"key:abc"}"#);
    /// ```
    pub fn to_json(&self) -> PushResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// User payload embedded in a presence channel token.
#[derive(Debug, Serialize)]
struct PresenceData<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_info: Option<&'a Value>,
}

/// Sign a subscription to `channel` for the connection `socket_id`.
///
/// Custom data that is empty or `"0"` is treated as absent.
///
/// # Examples
///
/// ```
/// use rustpush_auth::channel::socket_auth;
/// use rustpush_core::Credentials;
///
/// let creds = Credentials::new(1_u64, "key", "secret");
/// let token = socket_auth(&creds, "private-channel", "123.456", None);
/// assert!(token.auth.starts_with("key:"));
/// assert!(token.channel_data.is_none());
/// ```
#[must_use]
pub fn socket_auth(
    credentials: &Credentials,
    channel: &str,
    socket_id: &str,
    custom_data: Option<&str>,
) -> ChannelAuth {
    debug!(channel, socket_id, "Creating socket authorization signature");

    let custom_data = custom_data.filter(|data| !data.is_empty() && *data != "0");
    let message = match custom_data {
        Some(data) => format!("{socket_id}:{channel}:{data}"),
        None => format!("{socket_id}:{channel}"),
    };
    let signature = sign(credentials.secret(), &message);

    ChannelAuth {
        auth: format!("{}:{signature}", credentials.key()),
        channel_data: custom_data.map(ToOwned::to_owned),
    }
}

/// Sign a presence channel subscription carrying user identity.
///
/// `user_info` is only embedded when it is present and non-empty (see
/// [`is_present`]).
///
/// # Errors
///
/// Returns [`rustpush_core::PushError::Serialization`] if the user payload
/// cannot be encoded.
pub fn presence_auth(
    credentials: &Credentials,
    channel: &str,
    socket_id: &str,
    user_id: &str,
    user_info: Option<&Value>,
) -> PushResult<ChannelAuth> {
    let data = PresenceData {
        user_id,
        user_info: user_info.filter(|info| is_present(info)),
    };
    let channel_data = serde_json::to_string(&data)?;
    Ok(socket_auth(
        credentials,
        channel,
        socket_id,
        Some(channel_data.as_str()),
    ))
}

/// Whether a user info value counts as present.
///
/// `null`, `false`, zero, the empty string, `"0"`, and empty arrays or
/// objects count as absent.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
