//! Local control command server
//!
//! Listens on a loopback TCP socket for line-oriented control commands
//! from the radio front end. Connections are served strictly one at a
//! time: accept, read one payload, dispatch one command, move on. A
//! silent peer therefore stalls command processing until it closes --
//! acceptable for a single local client, which is all this bridge
//! serves.
//!
//! A peer that connects and closes without sending anything is skipped,
//! not treated as a reason to stop listening.

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use fdv_protocol::{ControlCommand, OutboundEvent};

use crate::error::LinkError;
use crate::session::Emitter;
use crate::state::ModeState;

/// One read per connection, matching the control protocol's
/// one-command-per-connection contract.
pub const READ_BUFFER_SIZE: usize = 1024;

/// The control command server
pub struct CommandServer {
    listener: TcpListener,
}

impl CommandServer {
    /// Bind the control socket.
    pub async fn bind(addr: &str) -> Result<Self, LinkError> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// The bound address, useful when binding port 0.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, LinkError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve control connections forever.
    ///
    /// Returns only on listener failure or when an emit fails because
    /// the session is gone; either way the bridge's work is done and
    /// the error propagates to the entry point.
    pub async fn serve(self, mode: ModeState, emitter: Emitter) -> Result<(), LinkError> {
        info!("control server listening on {}", self.local_addr()?);

        loop {
            let (mut conn, peer) = self.listener.accept().await?;
            debug!("control connection from {peer}");

            let mut buf = vec![0u8; READ_BUFFER_SIZE];
            let n = match conn.read(&mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    warn!("control read from {peer} failed: {e}");
                    continue;
                }
            };
            if n == 0 {
                // Peer closed without a command; keep serving.
                debug!("control peer {peer} sent nothing");
                continue;
            }

            let line = String::from_utf8_lossy(&buf[..n]);
            let command = ControlCommand::parse(&line);
            dispatch(command, &mode, &emitter).await?;
        }
    }
}

/// Apply one parsed command: mutate shared state and/or emit.
async fn dispatch(
    command: ControlCommand,
    mode: &ModeState,
    emitter: &Emitter,
) -> Result<(), LinkError> {
    match command {
        ControlCommand::FreqChange { freq_hz } => {
            info!("reporting frequency change to {freq_hz} Hz");
            emitter.emit(OutboundEvent::FreqChange { freq: freq_hz }).await
        }
        ControlCommand::ModeChange { mode: token } => {
            info!("mode changed to {token}");
            mode.set(&token);
            emitter
                .emit(OutboundEvent::TxReport {
                    mode: token,
                    transmitting: false,
                })
                .await
        }
        ControlCommand::TxOn => {
            // Mode is read at emit time, not when the server started.
            let current = mode.current();
            info!("transmitting on {current}");
            emitter
                .emit(OutboundEvent::TxReport {
                    mode: current,
                    transmitting: true,
                })
                .await
        }
        ControlCommand::TxOff => {
            let current = mode.current();
            info!("receive on {current}");
            emitter
                .emit(OutboundEvent::TxReport {
                    mode: current,
                    transmitting: false,
                })
                .await
        }
        ControlCommand::Invalid { raw } => {
            warn!("unrecognized control command: {raw:?}");
            Ok(())
        }
    }
}
