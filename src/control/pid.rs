//! PID controller for the heater.
//!
//! Positional PID on the filtered temperature, evaluated once per tick
//! (the sample period is folded into the gains).  Output is a heater
//! command in percent, clamped to `[0, 100]`.
//!
//! Anti-windup is a conditional-integration gate: the error is only
//! accumulated while the *previous unclamped* output was inside
//! `[0, 100)`.  Because the gate looks at the raw value, one more
//! accumulation can slip through right at the saturation boundary.

use log::{debug, info, warn};

use crate::app::ports::ActuatorPort;
use crate::error::{RangeError, Result};

/// Lowest accepted setpoint (°C).
pub const SETPOINT_MIN_C: f64 = 23.0;
/// Highest accepted setpoint (°C).
pub const SETPOINT_MAX_C: f64 = 74.0;

const OUTPUT_MIN: f64 = 0.0;
const OUTPUT_MAX: f64 = 100.0;

/// PID controller
#[derive(Debug, Clone)]
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    setpoint: f64,
    integral: f64,
    prev_error: f64,
    prev_output: f64,
    enabled: bool,
}

impl PidController {
    /// New controller with the given gains, setpoint 0 and control off.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            setpoint: 0.0,
            integral: 0.0,
            prev_error: 0.0,
            prev_output: 0.0,
            enabled: false,
        }
    }

    // ── Setpoint ──────────────────────────────────────────────

    /// Accept a new setpoint inside `[23, 74]` °C and clear the integral.
    ///
    /// Out-of-range values leave the controller untouched.
    pub fn set_temperature_setpoint(&mut self, setpoint: f64) -> Result<()> {
        if !(SETPOINT_MIN_C..=SETPOINT_MAX_C).contains(&setpoint) {
            debug!("PID: setpoint {setpoint} rejected");
            return Err(RangeError::SetpointOutOfRange.into());
        }
        self.integral = 0.0;
        self.setpoint = setpoint;
        Ok(())
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    // ── Gains ─────────────────────────────────────────────────

    pub fn set_kp(&mut self, kp: f64) {
        self.kp = kp;
    }

    pub fn set_ki(&mut self, ki: f64) {
        self.ki = ki;
    }

    pub fn set_kd(&mut self, kd: f64) {
        self.kd = kd;
    }

    pub fn kp(&self) -> f64 {
        self.kp
    }

    pub fn ki(&self) -> f64 {
        self.ki
    }

    pub fn kd(&self) -> f64 {
        self.kd
    }

    // ── On / off ──────────────────────────────────────────────

    /// Enable control with a clean history.
    pub fn turn_on(&mut self) {
        self.prev_error = 0.0;
        self.integral = 0.0;
        self.prev_output = 0.0;
        self.enabled = true;
        info!("PID: on (setpoint {:.1} C)", self.setpoint);
    }

    /// Disable control and drop the heater to zero.
    pub fn turn_off(&mut self, actuators: &mut impl ActuatorPort) {
        actuators.set_heater_duty(0.0);
        self.enabled = false;
        info!("PID: off");
    }

    pub fn is_on(&self) -> bool {
        self.enabled
    }

    /// Accumulated error sum (integral term before `ki`).
    pub fn integral(&self) -> f64 {
        self.integral
    }

    // ── Control law ───────────────────────────────────────────

    /// Compute the heater command (percent) for one tick.
    pub fn update(&mut self, measurement: f64) -> f64 {
        if !self.enabled {
            return 0.0;
        }

        let error = self.setpoint - measurement;
        let integral = if (OUTPUT_MIN..OUTPUT_MAX).contains(&self.prev_output) {
            self.integral + error
        } else {
            self.integral
        };
        let derivative = error - self.prev_error;
        let raw = self.kp * error + self.ki * integral + self.kd * derivative;

        // Non-finite output: keep the previous state untouched.
        if !raw.is_finite() {
            warn!("PID: non-finite output for measurement {measurement}, sample dropped");
            return OUTPUT_MIN;
        }

        self.integral = integral;
        self.prev_error = error;
        self.prev_output = raw;

        raw.clamp(OUTPUT_MIN, OUTPUT_MAX)
    }
}
