//! HMAC-SHA256 signing.
//!
//! [`sign`] is the single primitive behind both REST request signatures and
//! channel authorization tokens. It is a pure function of the secret and the
//! message, so identical inputs always produce the identical lowercase hex
//! signature.

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{AUTH_SIGNATURE, CanonicalRequest};

type HmacSha256 = Hmac<Sha256>;

/// Compute `HMAC-SHA256(secret, message)` as a lowercase hex string.
///
/// # Examples
///
/// ```
/// use rustpush_auth::signer::sign;
///
/// assert_eq!(
///     sign(b"secret", "123.456:private-channel"),
///     "bc7f86e5c8da546e3ef9f038628a3cc545514dde046a9f8fadda5829cd170c37"
/// );
/// ```
#[must_use]
pub fn sign(secret: &[u8], message: &str) -> String {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret)
        .expect("HMAC can accept keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a hex signature against `message` using constant-time comparison.
#[must_use]
pub fn verify(secret: &[u8], message: &str, signature: &str) -> bool {
    let expected = sign(secret, message);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

/// A canonical request together with its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    canonical: CanonicalRequest,
    signature: String,
}

impl SignedRequest {
    /// Sign the canonical string of `canonical` with `secret`.
    #[must_use]
    pub fn sign(canonical: CanonicalRequest, secret: &[u8]) -> Self {
        let string_to_sign = canonical.string_to_sign();
        let signature = sign(secret, &string_to_sign);

        debug!(
            method = canonical.method(),
            path = canonical.path(),
            signature = %signature,
            "Signed REST request"
        );

        Self {
            canonical,
            signature,
        }
    }

    /// The signed canonical request.
    #[must_use]
    pub fn canonical(&self) -> &CanonicalRequest {
        &self.canonical
    }

    /// The hex signature sent as `auth_signature`.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Every query parameter to send: the sorted signed parameters followed
    /// by `auth_signature`.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.canonical
            .params()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .chain(std::iter::once((
                AUTH_SIGNATURE.to_owned(),
                self.signature.clone(),
            )))
            .collect()
    }
}
