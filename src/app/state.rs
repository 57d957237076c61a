//! Shared control state.
//!
//! [`ControlState`] is the one structure both interrupt contexts touch:
//! the tick path writes readings and drives the controller, the byte
//! path (and the local interface) reads readings and retunes the
//! controller.  Access is serialised by [`SharedService`](super::shared::SharedService).

use log::info;

use crate::config::ControllerConfig;
use crate::control::deadline::{DeadlineTimer, TimerAction};
use crate::control::filter::DemaFilter;
use crate::control::pid::PidController;

/// Longest duration the deadline timer accepts (9999 min).
pub const TIMER_MAX_SECS: u32 = 599_940;

/// Latest measurements, refreshed by the control tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    /// Filtered temperature (°C).
    pub temperature: f64,
    pub tachometer_rpm: u32,
    pub heater_duty: f64,
    pub cooler_duty: f64,
}

/// What the next deadline-timer start will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSetup {
    pub duration_secs: u32,
    pub action: TimerAction,
}

impl Default for TimerSetup {
    fn default() -> Self {
        Self {
            duration_secs: 0,
            action: TimerAction::TurnOn,
        }
    }
}

impl TimerSetup {
    /// Store a duration, saturating at [`TIMER_MAX_SECS`].
    pub fn set_duration(&mut self, secs: u32) {
        self.duration_secs = secs.min(TIMER_MAX_SECS);
    }
}

#[derive(Debug, Clone)]
pub struct ControlState {
    pub pid: PidController,
    pub filter: DemaFilter,
    pub deadline: DeadlineTimer,
    pub timer_setup: TimerSetup,
    pub readings: Readings,
    local_input_unlocked: bool,
}

impl ControlState {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            pid: PidController::new(config.kp, config.ki, config.kd),
            filter: DemaFilter::new(0.0),
            deadline: DeadlineTimer::new(),
            timer_setup: TimerSetup::default(),
            readings: Readings::default(),
            local_input_unlocked: false,
        }
    }

    /// Arm the deadline timer from the stored setup.
    pub fn start_deadline(&mut self) {
        let TimerSetup {
            duration_secs,
            action,
        } = self.timer_setup;
        self.deadline.start(duration_secs, action);
    }

    /// Enable the local buttons.  There is no way back.
    pub fn unlock_local_input(&mut self) {
        if !self.local_input_unlocked {
            info!("Local buttons unlocked");
        }
        self.local_input_unlocked = true;
    }

    pub fn local_input_unlocked(&self) -> bool {
        self.local_input_unlocked
    }
}
