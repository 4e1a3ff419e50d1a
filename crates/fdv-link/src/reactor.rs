//! Inbound session event reactions
//!
//! Bound once at startup. Every inbound event is observational except
//! `mode_change`, which writes the shared mode state. Reactions never
//! call back into the command server or emit events of their own; the
//! two loops coordinate only through [`ModeState`].

use tokio::sync::mpsc;
use tracing::{info, warn};

use fdv_protocol::SessionEvent;

use crate::state::ModeState;

/// React to inbound session events until the session ends.
///
/// Returns once a `Disconnected` event arrives (or the channel closes);
/// the entry point treats that as loss of the session. No reconnection
/// is attempted here.
pub async fn run_reactor(mut events: mpsc::Receiver<SessionEvent>, mode: ModeState) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Connected => info!("reporting session established"),
            SessionEvent::ConnectError(reason) => warn!("session connect error: {reason}"),
            SessionEvent::Disconnected => {
                info!("reporting session ended");
                break;
            }
            SessionEvent::TextMessage(body) => info!("server message: {body}"),
            SessionEvent::RemoteFreqChange { freq } => info!("frequency changed to {freq} Hz"),
            SessionEvent::RemoteModeChange { mode: new_mode } => {
                mode.set(&new_mode);
                info!("mode changed to {new_mode}");
            }
            SessionEvent::RemoteTxReport { mode, transmitting } => {
                info!("tx report: mode={mode} transmitting={transmitting}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mode_change_mutates_state() {
        let mode = ModeState::new("700D");
        let (tx, rx) = mpsc::channel(4);
        let reactor = tokio::spawn(run_reactor(rx, mode.clone()));

        tx.send(SessionEvent::RemoteModeChange {
            mode: "2020".to_string(),
        })
        .await
        .unwrap();
        drop(tx);

        reactor.await.unwrap();
        assert_eq!(mode.current(), "2020");
    }

    #[tokio::test]
    async fn test_observational_events_leave_state_alone() {
        let mode = ModeState::new("700D");
        let (tx, rx) = mpsc::channel(8);
        let reactor = tokio::spawn(run_reactor(rx, mode.clone()));

        tx.send(SessionEvent::Connected).await.unwrap();
        tx.send(SessionEvent::RemoteFreqChange { freq: 7_074_000 })
            .await
            .unwrap();
        tx.send(SessionEvent::RemoteTxReport {
            mode: "700E".to_string(),
            transmitting: true,
        })
        .await
        .unwrap();
        drop(tx);

        reactor.await.unwrap();
        assert_eq!(mode.current(), "700D");
    }

    #[tokio::test]
    async fn test_reactor_ends_on_disconnect() {
        let mode = ModeState::new("700D");
        let (tx, rx) = mpsc::channel(4);
        let reactor = tokio::spawn(run_reactor(rx, mode));

        tx.send(SessionEvent::Disconnected).await.unwrap();

        // Reactor should return even though the sender is still alive.
        reactor.await.unwrap();
    }
}
