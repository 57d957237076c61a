//! Cooler fan tachometer.
//!
//! The fan emits 7 pulses per revolution.  An edge interrupt (or a
//! hardware counter on the board) bumps a pulse count; the scheduler's
//! tachometer task drains it once per window and converts to RPM.

use core::sync::atomic::{AtomicU32, Ordering};

/// Tach pulses per fan revolution.
pub const PULSES_PER_REV: u32 = 7;

/// RPM for `pulses` counted over `window_ms`.  A zero window reads 0.
pub fn rpm_from_pulses(pulses: u32, window_ms: u32) -> u32 {
    if window_ms == 0 {
        return 0;
    }
    let rpm = u64::from(pulses) * 60_000 / (u64::from(PULSES_PER_REV) * u64::from(window_ms));
    rpm.min(u64::from(u32::MAX)) as u32
}

/// Pulse accumulator shared between the edge ISR and the sampling task.
#[derive(Debug, Default)]
pub struct PulseCounter {
    pulses: AtomicU32,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            pulses: AtomicU32::new(0),
        }
    }

    /// Call from the edge interrupt.
    pub fn on_pulse(&self) {
        self.pulses.fetch_add(1, Ordering::Relaxed);
    }

    /// Add several pulses at once (hardware counters, simulation).
    pub fn add(&self, pulses: u32) {
        self.pulses.fetch_add(pulses, Ordering::Relaxed);
    }

    /// Drain the count and convert it to RPM over `window_ms`.
    pub fn sample_rpm(&self, window_ms: u32) -> u32 {
        rpm_from_pulses(self.pulses.swap(0, Ordering::AcqRel), window_ms)
    }
}
