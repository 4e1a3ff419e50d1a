//! FreeDV Reporter Protocol Library
//!
//! This crate provides the two message vocabularies spoken by the
//! reporter bridge:
//!
//! - **Control commands**: line-oriented ASCII commands received on the
//!   local control socket (`FREQ_CHANGE`, `MODE_CHANGE`, `TX_ON`,
//!   `TX_OFF`), normalized into [`ControlCommand`].
//! - **Session events**: named JSON events exchanged with the remote
//!   reporting session in either direction ([`OutboundEvent`],
//!   [`SessionEvent`]), plus the [`Identity`] payload presented once at
//!   connect time.
//!
//! Each session frame is a single JSON object carrying the event-name
//! tag and its named payload fields:
//!
//! ```text
//! {"event":"tx_report","data":{"mode":"700D","transmitting":true}}
//! ```
//!
//! # Example
//!
//! ```rust
//! use fdv_protocol::ControlCommand;
//!
//! let cmd = ControlCommand::parse("FREQ_CHANGE 14.236");
//! assert_eq!(cmd, ControlCommand::FreqChange { freq_hz: 14_236 });
//! ```

pub mod command;
pub mod error;
pub mod events;

pub use command::ControlCommand;
pub use error::ProtocolError;
pub use events::{
    decode_frame, encode_auth_frame, encode_frame, Identity, OutboundEvent, SessionEvent,
};
