//! Unified error types for the controller core.
//!
//! A single `Error` enum that every subsystem can convert into.  All
//! variants are `Copy` so they can be returned from interrupt-context
//! handlers without allocation.  Most of them are *local* rejections:
//! the caller decides whether the rejection is surfaced to the terminal
//! (heater duty cap) or dropped silently (setpoint range).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A value was outside the range its target accepts.
    Range(RangeError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(e) => write!(f, "range: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Range errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Setpoint outside the supported 23–74 °C window.
    SetpointOutOfRange,
    /// Heater duty above the hardware protection cap.
    HeaterDutyAboveCap,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetpointOutOfRange => write!(f, "setpoint out of range"),
            Self::HeaterDutyAboveCap => write!(f, "heater duty above cap"),
        }
    }
}

impl From<RangeError> for Error {
    fn from(e: RangeError) -> Self {
        Self::Range(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
