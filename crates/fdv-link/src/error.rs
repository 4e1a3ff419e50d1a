//! Error types for the bridge engine

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the bridge engine
#[derive(Debug, Error)]
pub enum LinkError {
    /// Configuration file could not be read
    #[error("cannot read configuration {path}: {source}")]
    Config {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Session connect failed
    #[error("session connect failed: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    /// Emit attempted while the session is not connected
    #[error("emit failed: session is not connected")]
    Emit,

    /// Wire format error
    #[error("protocol error: {0}")]
    Protocol(#[from] fdv_protocol::ProtocolError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
