//! Error types for RustPush.

/// Maximum number of channels a single event can be triggered on.
pub const MAX_TRIGGER_CHANNELS: usize = 100;

/// Error type shared by every RustPush operation.
///
/// Non-200 responses to read operations are not errors: they are reported
/// as `Ok(None)` by the REST client.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// More channels were supplied to a trigger than the service accepts.
    #[error(
        "an event can be triggered on a maximum of {MAX_TRIGGER_CHANNELS} channels in a single call (got {count})"
    )]
    TooManyChannels {
        /// Number of channels supplied by the caller.
        count: usize,
    },

    /// The HTTP exchange failed (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(String),

    /// Encoding a request body or decoding a response body failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for RustPush operations.
pub type PushResult<T> = Result<T, PushError>;
