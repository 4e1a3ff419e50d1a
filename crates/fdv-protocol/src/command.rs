//! Normalized control command representation
//!
//! This module provides the `ControlCommand` enum which is the parsed
//! form of one line received on the local control socket. Parsing is
//! total: anything that is not a well-formed command becomes
//! `ControlCommand::Invalid`, which the server logs and drops.

/// One parsed control-socket command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    /// Report a new dial frequency to the session
    FreqChange {
        /// Frequency in Hz, truncated from the decimal argument x 1000
        freq_hz: u64,
    },

    /// Change the active digital-voice mode
    ModeChange {
        /// New mode token (e.g. "700D", "1600FREEDV")
        mode: String,
    },

    /// Transmitter keyed
    TxOn,

    /// Transmitter unkeyed
    TxOff,

    /// Anything unrecognized or with wrong arity
    Invalid {
        /// The offending line, trimmed, for diagnostics
        raw: String,
    },
}

impl ControlCommand {
    /// Parse one line of control input.
    ///
    /// The grammar is `FREQ_CHANGE <decimal>`, `MODE_CHANGE <token>`,
    /// `TX_ON`, `TX_OFF`. Arity is strict: `TX_ON extra` or a bare
    /// `FREQ_CHANGE` both parse as `Invalid`.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            ["FREQ_CHANGE", arg] => match arg.parse::<f64>() {
                // The control side speaks in kHz-style decimals;
                // the session wants an integer, x1000 and truncated.
                Ok(value) if value.is_finite() && value >= 0.0 => Self::FreqChange {
                    freq_hz: (value * 1000.0) as u64,
                },
                _ => Self::Invalid { raw: line.into() },
            },
            ["MODE_CHANGE", mode] => Self::ModeChange {
                mode: (*mode).to_string(),
            },
            ["TX_ON"] => Self::TxOn,
            ["TX_OFF"] => Self::TxOff,
            _ => Self::Invalid { raw: line.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_freq_change() {
        assert_eq!(
            ControlCommand::parse("FREQ_CHANGE 14.236"),
            ControlCommand::FreqChange { freq_hz: 14_236 }
        );
        // Truncation, not rounding
        assert_eq!(
            ControlCommand::parse("FREQ_CHANGE 7.0749"),
            ControlCommand::FreqChange { freq_hz: 7_074 }
        );
        assert_eq!(
            ControlCommand::parse("FREQ_CHANGE 14236"),
            ControlCommand::FreqChange { freq_hz: 14_236_000 }
        );
    }

    #[test]
    fn test_freq_change_arity() {
        assert!(matches!(
            ControlCommand::parse("FREQ_CHANGE"),
            ControlCommand::Invalid { .. }
        ));
        assert!(matches!(
            ControlCommand::parse("FREQ_CHANGE 14.236 7.074"),
            ControlCommand::Invalid { .. }
        ));
        assert!(matches!(
            ControlCommand::parse("FREQ_CHANGE fourteen"),
            ControlCommand::Invalid { .. }
        ));
    }

    #[test]
    fn test_freq_change_rejects_negative() {
        // A dial frequency is never negative; reject rather than wrap.
        assert!(matches!(
            ControlCommand::parse("FREQ_CHANGE -7.074"),
            ControlCommand::Invalid { .. }
        ));
        assert!(matches!(
            ControlCommand::parse("FREQ_CHANGE NaN"),
            ControlCommand::Invalid { .. }
        ));
    }

    #[test]
    fn test_mode_change() {
        assert_eq!(
            ControlCommand::parse("MODE_CHANGE 1600FREEDV"),
            ControlCommand::ModeChange {
                mode: "1600FREEDV".to_string()
            }
        );
        assert!(matches!(
            ControlCommand::parse("MODE_CHANGE"),
            ControlCommand::Invalid { .. }
        ));
        assert!(matches!(
            ControlCommand::parse("MODE_CHANGE 700D 700E"),
            ControlCommand::Invalid { .. }
        ));
    }

    #[test]
    fn test_tx_commands() {
        assert_eq!(ControlCommand::parse("TX_ON"), ControlCommand::TxOn);
        assert_eq!(ControlCommand::parse("TX_OFF"), ControlCommand::TxOff);
        assert_eq!(ControlCommand::parse("  TX_ON\n"), ControlCommand::TxOn);
        // Strict arity - trailing arguments are not a keyed transmitter
        assert!(matches!(
            ControlCommand::parse("TX_ON now"),
            ControlCommand::Invalid { .. }
        ));
    }

    #[test]
    fn test_unrecognized() {
        assert!(matches!(
            ControlCommand::parse("PING"),
            ControlCommand::Invalid { .. }
        ));
        assert!(matches!(
            ControlCommand::parse(""),
            ControlCommand::Invalid { .. }
        ));
        assert!(matches!(
            ControlCommand::parse("freq_change 14.236"),
            ControlCommand::Invalid { .. }
        ));
    }

    #[test]
    fn test_invalid_preserves_raw() {
        match ControlCommand::parse("  PING \n") {
            ControlCommand::Invalid { raw } => assert_eq!(raw, "PING"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(line in "\\PC*") {
            let _ = ControlCommand::parse(&line);
        }

        #[test]
        fn prop_freq_scaled_and_truncated(khz in 0.0f64..1_000_000.0) {
            let line = format!("FREQ_CHANGE {khz}");
            match ControlCommand::parse(&line) {
                ControlCommand::FreqChange { freq_hz } => {
                    prop_assert_eq!(freq_hz, (khz * 1000.0) as u64);
                }
                other => prop_assert!(false, "expected FreqChange, got {:?}", other),
            }
        }

        #[test]
        fn prop_mode_token_round_trips(mode in "[A-Za-z0-9]{1,16}") {
            let line = format!("MODE_CHANGE {mode}");
            prop_assert_eq!(
                ControlCommand::parse(&line),
                ControlCommand::ModeChange { mode }
            );
        }
    }
}
