//! Shared mode state
//!
//! The current digital-voice mode is the only value mutated by both
//! active loops: the inbound event reactor (on `mode_change`) and the
//! command server (on `MODE_CHANGE`). It lives behind a mutex so a
//! reader always observes a complete token, never a partial write.

use std::sync::{Arc, Mutex};

use tracing::warn;

/// Handle to the current mode, cheap to clone across tasks
#[derive(Debug, Clone)]
pub struct ModeState {
    inner: Arc<Mutex<String>>,
}

impl ModeState {
    /// Create with the initial mode from configuration.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial.into())),
        }
    }

    /// Read the current mode.
    pub fn current(&self) -> String {
        self.lock().clone()
    }

    /// Replace the current mode.
    ///
    /// Empty tokens are rejected; the mode must never be empty.
    pub fn set(&self, mode: &str) {
        if mode.is_empty() {
            warn!("ignoring empty mode update");
            return;
        }
        *self.lock() = mode.to_string();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, String> {
        // A poisoned lock only means a panicking writer; the stored
        // token is still a complete string.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode() {
        let mode = ModeState::new("700D");
        assert_eq!(mode.current(), "700D");
    }

    #[test]
    fn test_set_replaces() {
        let mode = ModeState::new("700D");
        mode.set("1600FREEDV");
        assert_eq!(mode.current(), "1600FREEDV");
    }

    #[test]
    fn test_empty_set_is_ignored() {
        let mode = ModeState::new("700D");
        mode.set("");
        assert_eq!(mode.current(), "700D");
    }

    #[test]
    fn test_clones_share_state() {
        let mode = ModeState::new("700D");
        let other = mode.clone();
        other.set("700E");
        assert_eq!(mode.current(), "700E");
    }

    #[test]
    fn test_concurrent_reads_see_whole_tokens() {
        let mode = ModeState::new("700D");
        let writer_mode = mode.clone();

        let writer = std::thread::spawn(move || {
            for _ in 0..1000 {
                writer_mode.set("700D");
                writer_mode.set("1600FREEDV");
            }
        });

        for _ in 0..1000 {
            let current = mode.current();
            assert!(
                current == "700D" || current == "1600FREEDV",
                "torn read: {current:?}"
            );
        }

        writer.join().unwrap();
    }
}
