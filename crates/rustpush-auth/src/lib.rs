//! Request signing and channel authorization for RustPush.
//!
//! This crate implements the client side of the service's authentication
//! protocol. Two flows share one primitive, HMAC-SHA256 keyed with the
//! application secret:
//!
//! - REST calls: every request carries `auth_key`, `auth_timestamp`,
//!   `auth_version` (and `body_md5` for POST bodies) as query parameters,
//!   plus `auth_signature` computed over the canonical string
//!   `METHOD\npath\nsorted-query`.
//! - Channel subscriptions: a private or presence channel token is the HMAC
//!   of `socket_id:channel[:channel_data]`, returned to the subscribing
//!   client as `{"auth": "key:signature", "channel_data": ...}`.
//!
//! # Usage
//!
//! ```rust
//! use rustpush_auth::canonical::CanonicalRequest;
//! use rustpush_auth::signer::SignedRequest;
//!
//! let canonical = CanonicalRequest::new("get", "/apps/3/channels", "key", 1_353_088_179)
//!     .with_params([("filter_by_prefix", "presence-")]);
//! let signed = SignedRequest::sign(canonical, b"secret");
//! assert_eq!(signed.signature().len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction and body digests
//! - [`signer`] - HMAC-SHA256 signing and signed query parameters
//! - [`channel`] - Private and presence channel authorization tokens

pub mod canonical;
pub mod channel;
pub mod signer;

pub use canonical::{AUTH_VERSION, CanonicalRequest, hash_body, validate_channel_count};
pub use channel::{ChannelAuth, presence_auth, socket_auth};
pub use signer::{SignedRequest, sign, verify};
