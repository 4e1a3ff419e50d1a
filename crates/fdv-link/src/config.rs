//! Station configuration store
//!
//! Loads a flat `key=value` file and overlays it onto a fixed default
//! map. Keys are case-sensitive and values are trimmed; keys the bridge
//! does not interpret are retained so a newer control program can pass
//! settings through an older bridge unchanged.

use std::collections::HashMap;
use std::path::Path;

use crate::error::LinkError;

/// Default mode when the configuration never names one. This doubles as
/// the fallback for a missing `fdvmode` key since the default map seeds
/// it; there is no separate "absent after overlay" token.
pub const DEFAULT_MODE: &str = "700D";

/// Seeded defaults, overwritten by the configuration file.
fn default_settings() -> HashMap<String, String> {
    HashMap::from([
        ("fdvmode".to_string(), DEFAULT_MODE.to_string()),
        ("grid_square".to_string(), "AA00aa".to_string()),
        ("callsign".to_string(), "N0CALL".to_string()),
        ("version".to_string(), "1.0.0".to_string()),
        ("message".to_string(), "--".to_string()),
    ])
}

/// Station configuration, immutable after load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Operator callsign
    pub callsign: String,
    /// Maidenhead locator
    pub grid_square: String,
    /// Software version string reported to the session
    pub version: String,
    /// Free-text station message
    pub message: String,
    /// Mode the bridge starts in, from `fdvmode`
    pub initial_mode: String,
    /// Keys the bridge does not interpret, retained verbatim
    pub extra: HashMap<String, String>,
}

impl Config {
    /// Load configuration from a flat `key=value` file.
    ///
    /// An unreadable file is fatal; the caller decides what to do about
    /// it. A readable file with no recognized keys just yields the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LinkError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LinkError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_overlay(&contents))
    }

    /// Overlay file contents onto the default map.
    ///
    /// Lines without `=` are ignored; the first `=` splits key from
    /// value, both trimmed.
    pub fn from_overlay(contents: &str) -> Self {
        let mut settings = default_settings();

        for line in contents.lines() {
            if let Some((key, value)) = line.split_once('=') {
                settings.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        let mut take = |key: &str, fallback: &str| {
            settings
                .remove(key)
                .unwrap_or_else(|| fallback.to_string())
        };

        let callsign = take("callsign", "N0CALL");
        let grid_square = take("grid_square", "AA00aa");
        let version = take("version", "1.0.0");
        let message = take("message", "--");
        let initial_mode = take("fdvmode", DEFAULT_MODE);

        Self {
            callsign,
            grid_square,
            version,
            message,
            initial_mode,
            extra: settings,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_overlay("")
    }
}
