//! Canonical request construction for REST call signing.
//!
//! The string to sign is built from three newline-separated segments:
//!
//! ```text
//! HTTPRequestMethod\n
//! Path\n
//! CanonicalQueryString
//! ```
//!
//! The query string contains every parameter sent with the request except
//! `auth_signature`, sorted by key in byte order and joined as `key=value`
//! pairs with `&`. Values are used exactly as given: URL-encoding only happens
//! later, when the transport builds the outgoing request.

use std::collections::BTreeMap;

use md5::{Digest, Md5};
use rustpush_core::{MAX_TRIGGER_CHANNELS, PushError, PushResult};

/// Version tag of the canonicalization and signing rules.
pub const AUTH_VERSION: &str = "1.0";

/// Query parameter that carries the request signature.
pub const AUTH_SIGNATURE: &str = "auth_signature";

/// A request reduced to the parts covered by its signature.
///
/// Parameters are kept in a [`BTreeMap`], so the canonical query string does
/// not depend on the order in which parameters were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    path: String,
    params: BTreeMap<String, String>,
}

impl CanonicalRequest {
    /// Start a canonical request carrying the three mandatory auth fields.
    ///
    /// The method is upper-cased. `path` must not contain a query string.
    #[must_use]
    pub fn new(method: &str, path: &str, auth_key: &str, auth_timestamp: i64) -> Self {
        let mut params = BTreeMap::new();
        params.insert("auth_key".to_owned(), auth_key.to_owned());
        params.insert("auth_timestamp".to_owned(), auth_timestamp.to_string());
        params.insert("auth_version".to_owned(), AUTH_VERSION.to_owned());

        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_owned(),
            params,
        }
    }

    /// Add caller-supplied query parameters.
    ///
    /// The auth fields already present are never overwritten, and
    /// `auth_signature` is dropped since it cannot sign itself.
    #[must_use]
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            let key = key.into();
            if key == AUTH_SIGNATURE {
                continue;
            }
            self.params.entry(key).or_insert_with(|| value.into());
        }
        self
    }

    /// Cover the exact bytes of a request body with a `body_md5` parameter.
    #[must_use]
    pub fn with_body(mut self, body: &[u8]) -> Self {
        self.params.insert("body_md5".to_owned(), hash_body(body));
        self
    }

    /// The upper-cased HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request path, without query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The sorted parameter set.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Build the canonical query string from the sorted parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use rustpush_auth::canonical::CanonicalRequest;
    ///
    /// let request = CanonicalRequest::new("GET", "/apps/1/channels", "k", 10)
    ///     .with_params([("info", "user_count")]);
    /// assert_eq!(
    ///     request.canonical_query_string(),
    ///     "auth_key=k&auth_timestamp=10&auth_version=1.0&info=user_count"
    /// );
    /// ```
    #[must_use]
    pub fn canonical_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Build the full string to sign.
    #[must_use]
    pub fn string_to_sign(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.method,
            self.path,
            self.canonical_query_string()
        )
    }
}

/// Hex MD5 digest of a request body, as sent in `body_md5`.
///
/// # Examples
///
/// ```
/// use rustpush_auth::canonical::hash_body;
///
/// assert_eq!(hash_body(b""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
#[must_use]
pub fn hash_body(body: &[u8]) -> String {
    hex::encode(Md5::digest(body))
}

/// Reject triggers addressed to more channels than the service accepts.
///
/// # Errors
///
/// Returns [`PushError::TooManyChannels`] when `count` exceeds
/// [`MAX_TRIGGER_CHANNELS`].
pub fn validate_channel_count(count: usize) -> PushResult<()> {
    if count > MAX_TRIGGER_CHANNELS {
        return Err(PushError::TooManyChannels { count });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT_BODY: &str = r#"{"name":"foo","channels":["project-3"],"data":"{\"some\":\"data\"}"}"#;

    #[test]
    fn test_should_always_include_auth_fields() {
        let request = CanonicalRequest::new("GET", "/apps/3/channels", "key", 1);
        let params = request.params();
        assert_eq!(params["auth_key"], "key");
        assert_eq!(params["auth_timestamp"], "1");
        assert_eq!(params["auth_version"], "1.0");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_should_upper_case_method() {
        let request = CanonicalRequest::new("post", "/apps/3/events", "key", 1);
        assert_eq!(request.method(), "POST");
        assert!(request.string_to_sign().starts_with("POST\n/apps/3/events\n"));
    }

    #[test]
    fn test_should_hash_exact_body_bytes() {
        assert_eq!(
            hash_body(EVENT_BODY.as_bytes()),
            "ec365a775a4cd0599faeb73354201b6f"
        );
    }

    #[test]
    fn test_should_build_string_to_sign_for_event_post() {
        let request = CanonicalRequest::new(
            "POST",
            "/apps/3/events",
            "278d425bdf160c739803",
            1_353_088_179,
        )
        .with_body(EVENT_BODY.as_bytes());
        assert_eq!(
            request.string_to_sign(),
            "POST\n/apps/3/events\n\
             auth_key=278d425bdf160c739803&auth_timestamp=1353088179&auth_version=1.0\
             &body_md5=ec365a775a4cd0599faeb73354201b6f"
        );
    }

    #[test]
    fn test_should_ignore_parameter_insertion_order() {
        let a = CanonicalRequest::new("GET", "/apps/1/channels", "k", 5)
            .with_params([("info", "user_count"), ("filter_by_prefix", "presence-")]);
        let b = CanonicalRequest::new("GET", "/apps/1/channels", "k", 5)
            .with_params([("filter_by_prefix", "presence-"), ("info", "user_count")]);
        assert_eq!(a.string_to_sign(), b.string_to_sign());
        assert_eq!(
            a.canonical_query_string(),
            "auth_key=k&auth_timestamp=5&auth_version=1.0&filter_by_prefix=presence-&info=user_count"
        );
    }

    #[test]
    fn test_should_sort_keys_by_byte_order() {
        let request = CanonicalRequest::new("GET", "/p", "k", 1)
            .with_params([("b", "1"), ("B", "2"), ("a_", "3")]);
        // Upper-case letters sort before `_` and lower-case letters.
        assert!(request.canonical_query_string().starts_with("B=2&a_=3&auth_key=k"));
    }

    #[test]
    fn test_should_keep_values_unencoded() {
        let request = CanonicalRequest::new("GET", "/p", "k", 1)
            .with_params([("info", "user_count,subscription_count"), ("q", "a b&c")]);
        let query = request.canonical_query_string();
        assert!(query.contains("info=user_count,subscription_count"));
        assert!(query.contains("q=a b&c"));
    }

    #[test]
    fn test_should_not_let_caller_override_auth_fields() {
        let request = CanonicalRequest::new("GET", "/p", "real", 1).with_params([
            ("auth_key", "forged"),
            ("auth_signature", "abc"),
        ]);
        assert_eq!(request.params()["auth_key"], "real");
        assert!(!request.params().contains_key(AUTH_SIGNATURE));
    }

    #[test]
    fn test_should_accept_up_to_limit_channels() {
        assert!(validate_channel_count(0).is_ok());
        assert!(validate_channel_count(MAX_TRIGGER_CHANNELS).is_ok());
    }

    #[test]
    fn test_should_reject_more_than_limit_channels() {
        let err = validate_channel_count(MAX_TRIGGER_CHANNELS + 1).unwrap_err();
        assert!(matches!(err, PushError::TooManyChannels { count: 101 }));
    }
}
