//! One-shot deadline timer that switches the PID on or off unattended.
//!
//! Driven by the scheduler tick, not a wall clock: each `tick` subtracts
//! the nominal period, so a late or missed tick skews the deadline.
//!
//! ```text
//!   Disarmed ──start(s, action)──▶ Armed(ms, action)
//!       ▲                              │  │
//!       └──────────abort()─────────────┘  │ tick: ms ≤ 0 → fire, disarm
//!       └─────────────────────────────────┘
//! ```
//!
//! `start` on an armed timer replaces the pending deadline and action
//! without notifying anyone (latest wins).

use log::info;

use crate::app::ports::ActuatorPort;
use crate::control::pid::PidController;

/// What the timer does to the controller when it elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    TurnOn,
    TurnOff,
}

impl TimerAction {
    /// `1` selects turn-on; anything else turn-off.
    pub fn from_flag(on: bool) -> Self {
        if on { Self::TurnOn } else { Self::TurnOff }
    }
}

#[derive(Debug, Clone)]
pub struct DeadlineTimer {
    /// Only meaningful while armed.  Signed so the final subtraction can
    /// undershoot before the timer disarms.
    remaining_ms: i64,
    armed: bool,
    action: TimerAction,
}

impl Default for DeadlineTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self {
            remaining_ms: 0,
            armed: false,
            action: TimerAction::TurnOn,
        }
    }

    /// Arm (or re-arm) for `duration_secs` seconds.
    pub fn start(&mut self, duration_secs: u32, action: TimerAction) {
        self.remaining_ms = i64::from(duration_secs) * 1000;
        self.action = action;
        self.armed = true;
        info!("Deadline: armed {duration_secs}s -> {action:?}");
    }

    /// Disarm without firing.
    pub fn abort(&mut self) {
        if self.armed {
            info!("Deadline: aborted");
        }
        self.armed = false;
    }

    /// Advance by one scheduler period.  Returns the action if it fired.
    pub fn tick(
        &mut self,
        period_ms: u32,
        pid: &mut PidController,
        actuators: &mut impl ActuatorPort,
    ) -> Option<TimerAction> {
        if !self.armed {
            return None;
        }

        self.remaining_ms -= i64::from(period_ms);
        if self.remaining_ms > 0 {
            return None;
        }

        match self.action {
            TimerAction::TurnOff => pid.turn_off(actuators),
            // Re-enabling a running controller would wipe its integral.
            TimerAction::TurnOn if !pid.is_on() => pid.turn_on(),
            TimerAction::TurnOn => {}
        }
        self.armed = false;
        info!("Deadline: fired {:?}", self.action);
        Some(self.action)
    }

    /// Milliseconds until firing, or 0 when disarmed.
    pub fn remaining_ms(&self) -> u32 {
        if self.armed {
            self.remaining_ms.clamp(0, i64::from(u32::MAX)) as u32
        } else {
            0
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Action of the current (or last) arm.
    pub fn action(&self) -> TimerAction {
        self.action
    }
}
