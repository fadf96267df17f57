//! Client error types.
//!
//! [`ClientError`] is the central error type. Connection-level failures are
//! handled inside the connection manager and never escape `run()`; these
//! variants exist so the classifier and the session write path can report
//! *why* a frame was dropped or a session torn down.

/// Errors raised while classifying frames or writing to the transport.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A frame was not valid JSON or did not match any known shape.
    #[error("undecodable frame: {0}")]
    Decode(#[from] serde_json::Error),

    /// The first frame of a session violated an initialization invariant.
    #[error("invalid initialization payload: {0}")]
    InvalidInitialization(String),

    /// The WebSocket transport failed mid-session.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}
