//! FreeDV Reporter Bridge Engine
//!
//! This crate bridges a local line-oriented control socket to a
//! persistent remote reporting session. A radio front end sends simple
//! text commands (frequency, mode, transmit status); the bridge
//! translates them into named session events and reacts to inbound
//! session events by updating locally held state.
//!
//! # Architecture
//!
//! Four tasks run for the life of the process:
//!
//! - the **command server** accept loop ([`CommandServer`]), serving one
//!   control connection at a time
//! - the session **writer**, draining the single emit queue onto the wire
//! - the session **reader**, decoding inbound frames
//! - the **reactor** ([`run_reactor`]), applying inbound events
//!
//! The command side and the reaction side coordinate only through the
//! mutex-guarded [`ModeState`] and the [`Emitter`] handle; there is no
//! other synchronization point. Nothing here retries: a lost session
//! surfaces to the entry point, which disconnects and exits.
//!
//! # Example
//!
//! ```rust,no_run
//! use fdv_link::{CommandServer, Config, ModeState, SessionClient};
//! use fdv_protocol::Identity;
//!
//! # async fn example() -> Result<(), fdv_link::LinkError> {
//! let config = Config::load("config.ini")?;
//! let mode = ModeState::new(&config.initial_mode);
//!
//! let identity = Identity::report_only(config.callsign, config.grid_square, config.version);
//! let (client, events) = SessionClient::connect("ws://qso.freedv.org/", identity).await?;
//!
//! tokio::spawn(fdv_link::run_reactor(events, mode.clone()));
//!
//! let server = CommandServer::bind("127.0.0.1:50007").await?;
//! server.serve(mode, client.emitter()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod reactor;
pub mod server;
pub mod session;
pub mod state;

pub use config::{Config, DEFAULT_MODE};
pub use error::LinkError;
pub use reactor::run_reactor;
pub use server::CommandServer;
pub use session::{Emitter, SessionClient, CHANNEL_DEPTH};
pub use state::ModeState;
