//! Error types for session frame encoding and decoding

use thiserror::Error;

/// Errors that can occur on the session wire format
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An outbound event could not be serialized
    #[error("frame encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// An inbound frame was not a recognized session event
    #[error("unrecognized session frame: {0}")]
    Decode(#[source] serde_json::Error),
}
