//! Session event types and their JSON wire encoding
//!
//! Every frame on the reporting session is a JSON object with an
//! `event` name tag and a `data` payload. Outbound and inbound
//! vocabularies are disjoint enums: the bridge only ever *emits*
//! [`OutboundEvent`] and only ever *receives* [`SessionEvent`].
//!
//! The `connect` / `disconnect` variants double as wire events and as
//! locally synthesized lifecycle notifications from the transport.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Identity payload presented once when the session is opened.
///
/// Sent as the first frame after the transport connects; it is never
/// renegotiated for the life of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Operator station identifier
    pub callsign: String,
    /// Maidenhead locator
    pub grid_square: String,
    /// Reporting software version
    pub version: String,
    /// Session role; this bridge only writes reports
    pub role: String,
    /// Host operating system tag
    pub os: String,
}

impl Identity {
    /// Build the write-only reporter identity for this platform.
    pub fn report_only(callsign: String, grid_square: String, version: String) -> Self {
        Self {
            callsign,
            grid_square,
            version,
            role: "report_wo".to_string(),
            os: "linux".to_string(),
        }
    }
}

/// Events the bridge emits to the reporting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Transmit status report
    TxReport {
        /// Active digital-voice mode
        mode: String,
        /// Whether the transmitter is keyed
        transmitting: bool,
    },

    /// Dial frequency report
    FreqChange {
        /// Frequency in Hz
        freq: u64,
    },

    /// Free-text station message update
    MessageUpdate {
        /// The station message
        message: String,
    },
}

/// Events received from the reporting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum SessionEvent {
    /// The session is established
    #[serde(rename = "connect")]
    Connected,

    /// The session could not be established
    #[serde(rename = "connect_error")]
    ConnectError(serde_json::Value),

    /// The session was closed
    #[serde(rename = "disconnect")]
    Disconnected,

    /// Free-text message from the server
    #[serde(rename = "message")]
    TextMessage(serde_json::Value),

    /// Another party reported a frequency change
    #[serde(rename = "freq_change")]
    RemoteFreqChange {
        /// Frequency in Hz
        freq: u64,
    },

    /// The server pushed a mode change
    #[serde(rename = "mode_change")]
    RemoteModeChange {
        /// New mode token
        mode: String,
    },

    /// Another party reported transmit status
    #[serde(rename = "tx_report")]
    RemoteTxReport {
        /// Reported mode
        mode: String,
        /// Whether that station is transmitting
        transmitting: bool,
    },
}

/// Encode an outbound event as one JSON wire frame.
pub fn encode_frame(event: &OutboundEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(event).map_err(ProtocolError::Encode)
}

/// Encode the connect-time identity payload as an `auth` frame.
///
/// This uses the same envelope as every other frame so the server can
/// route it by event name.
pub fn encode_auth_frame(identity: &Identity) -> Result<String, ProtocolError> {
    let frame = serde_json::json!({ "event": "auth", "data": identity });
    serde_json::to_string(&frame).map_err(ProtocolError::Encode)
}

/// Decode one inbound JSON wire frame.
///
/// Frames with unknown event names or malformed payloads are a
/// [`ProtocolError::Decode`]; callers skip them and keep the session.
pub fn decode_frame(frame: &str) -> Result<SessionEvent, ProtocolError> {
    serde_json::from_str(frame).map_err(ProtocolError::Decode)
}
