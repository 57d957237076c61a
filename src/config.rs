//! Controller configuration parameters
//!
//! Timing and default tuning for the control core.  Nothing here is
//! persisted; the host simulator can load an override from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Timing ---
    /// Hardware tick period (milliseconds)
    pub tick_period_ms: u32,
    /// Tachometer is sampled every N ticks
    pub tachometer_every_ticks: u32,
    /// Local interface is refreshed every N ticks
    pub interface_every_ticks: u32,

    // --- PID defaults ---
    /// Proportional gain at startup
    pub kp: f64,
    /// Integral gain at startup
    pub ki: f64,
    /// Derivative gain at startup
    pub kd: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_ms: 100,        // 10 Hz
            tachometer_every_ticks: 10, // 1 s window
            interface_every_ticks: 5,   // 2 Hz

            // PID (tuned on the reference heater plant)
            kp: 10.0,
            ki: 0.1,
            kd: 20.0,
        }
    }
}

impl ControllerConfig {
    /// Reject values the scheduler or the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(Error::Config("tick period must be non-zero"));
        }
        if self.tachometer_every_ticks == 0 || self.interface_every_ticks == 0 {
            return Err(Error::Config("task dividers must be non-zero"));
        }
        if self
            .tick_period_ms
            .checked_mul(self.tachometer_every_ticks)
            .is_none()
        {
            return Err(Error::Config("tachometer window overflows"));
        }
        if !(self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()) {
            return Err(Error::Config("PID gains must be finite"));
        }
        Ok(())
    }

    /// Length of one tachometer sampling window in milliseconds.
    pub fn tachometer_window_ms(&self) -> u32 {
        self.tick_period_ms.saturating_mul(self.tachometer_every_ticks)
    }
}
