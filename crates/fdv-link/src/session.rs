//! Reporter session client
//!
//! Owns the persistent outbound WebSocket session. The identity payload
//! is sent once, as the first frame after connect. Two tasks run for
//! the life of the session:
//!
//! - a **writer** draining the emit queue, so emits from any task are
//!   serialized onto the wire in order (single-writer rule)
//! - a **reader** decoding inbound frames into [`SessionEvent`]s and
//!   delivering them to the reactor channel
//!
//! There is no reconnection: a dropped session surfaces as a
//! synthesized `Disconnected` event and the emit queue starts failing.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use fdv_protocol::{
    decode_frame, encode_auth_frame, encode_frame, Identity, OutboundEvent, SessionEvent,
};

use crate::error::LinkError;

/// Depth of the emit queue and the inbound event channel.
pub const CHANNEL_DEPTH: usize = 64;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Clonable handle for emitting events to the session.
///
/// Safe to call from any task; emits are funneled through the writer
/// task so they never interleave on the wire.
#[derive(Debug, Clone)]
pub struct Emitter {
    tx: mpsc::Sender<OutboundEvent>,
}

impl Emitter {
    /// Emit one event to the session.
    ///
    /// Fails with [`LinkError::Emit`] once the session is gone; callers
    /// must not swallow this.
    pub async fn emit(&self, event: OutboundEvent) -> Result<(), LinkError> {
        self.tx.send(event).await.map_err(|_| LinkError::Emit)
    }

    /// Create an emitter backed by a bare channel, with no session
    /// behind it. The receiver sees every emitted event.
    ///
    /// This is the test seam: the command server only ever talks to an
    /// [`Emitter`], so tests can observe emissions without a socket.
    pub fn detached(buffer: usize) -> (Self, mpsc::Receiver<OutboundEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

/// The persistent reporter session
pub struct SessionClient {
    emitter: Emitter,
    close_tx: oneshot::Sender<()>,
    write_task: JoinHandle<()>,
    read_task: JoinHandle<()>,
}

impl SessionClient {
    /// Connect to the reporting endpoint and present the identity.
    ///
    /// Returns the client plus the inbound event stream; the caller
    /// hands the stream to the reactor. Connect failure is fatal for
    /// the bridge's purpose, so it propagates.
    pub async fn connect(
        endpoint: &str,
        identity: Identity,
    ) -> Result<(Self, mpsc::Receiver<SessionEvent>), LinkError> {
        let (stream, _response) = connect_async(endpoint).await?;
        info!("connected to reporting session at {endpoint}");

        let (mut sink, source) = stream.split();

        // Identity goes out before anything else and is never renegotiated.
        let auth = encode_auth_frame(&identity)?;
        sink.send(Message::Text(auth)).await?;

        let (emit_tx, emit_rx) = mpsc::channel(CHANNEL_DEPTH);
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_DEPTH);
        let (close_tx, close_rx) = oneshot::channel();

        let write_task = tokio::spawn(run_writer(sink, emit_rx, close_rx));
        let read_task = tokio::spawn(run_reader(source, event_tx));

        let client = Self {
            emitter: Emitter { tx: emit_tx },
            close_tx,
            write_task,
            read_task,
        };

        Ok((client, event_rx))
    }

    /// Get a handle for emitting events from other tasks.
    pub fn emitter(&self) -> Emitter {
        self.emitter.clone()
    }

    /// Orderly disconnect: stop the writer (which sends a close frame)
    /// and wait for both transport tasks to finish.
    pub async fn close(self) {
        let _ = self.close_tx.send(());
        let _ = self.write_task.await;
        // The reader ends on its own once the peer acknowledges the
        // close; don't leave it dangling if the peer never does.
        self.read_task.abort();
        let _ = self.read_task.await;
    }
}

/// Drain the emit queue onto the wire, then send a close frame.
async fn run_writer(
    mut sink: WsSink,
    mut emit_rx: mpsc::Receiver<OutboundEvent>,
    mut close_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            event = emit_rx.recv() => {
                let Some(event) = event else { break };
                let frame = match encode_frame(&event) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("dropping unencodable event: {e}");
                        continue;
                    }
                };
                debug!("emit {frame}");
                if let Err(e) = sink.send(Message::Text(frame)).await {
                    warn!("session write failed: {e}");
                    return;
                }
            }
            _ = &mut close_rx => break,
        }
    }

    let _ = sink.send(Message::Close(None)).await;
    let _ = sink.flush().await;
}

/// Decode inbound frames into session events until the session ends.
///
/// Unrecognized frames are skipped; transport errors and close frames
/// end the loop and surface as a synthesized `Disconnected`.
async fn run_reader(mut source: WsSource, event_tx: mpsc::Sender<SessionEvent>) {
    while let Some(message) = source.next().await {
        match message {
            Ok(Message::Text(text)) => match decode_frame(&text) {
                Ok(event) => {
                    if event_tx.send(event).await.is_err() {
                        return;
                    }
                }
                Err(e) => debug!("skipping inbound frame: {e}"),
            },
            Ok(Message::Close(_)) => {
                info!("session closed by server");
                break;
            }
            Ok(_) => {
                // Ping/pong handled by the transport; binary frames are
                // not part of this protocol.
            }
            Err(e) => {
                warn!("session transport error: {e}");
                break;
            }
        }
    }

    let _ = event_tx.send(SessionEvent::Disconnected).await;
}
