//! Heater and cooler PWM outputs.
//!
//! Wraps two `embedded-hal` [`SetDutyCycle`] channels behind the
//! [`ActuatorPort`].  Duties are fractions in `[0, 1]`; anything outside
//! that range is ignored and the output keeps its previous value.
//!
//! The reported duty is read back from the programmed compare value, so
//! it carries the channel's quantisation (`raw / max_duty`).
//!
//! ## Dual-target design
//!
//! On the board: the HAL's timer channels.
//! On host/test: any `SetDutyCycle` mock.

use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::{debug, warn};

use crate::app::ports::ActuatorPort;

/// One PWM output with its last successfully programmed compare value.
struct Channel<P> {
    name: &'static str,
    pwm: P,
    raw: u16,
}

impl<P: SetDutyCycle> Channel<P> {
    fn new(name: &'static str, mut pwm: P) -> Self {
        // Start dark: both loads off until the controller says otherwise.
        if let Err(e) = pwm.set_duty_cycle_fully_off() {
            warn!("PWM: {name} init failed ({:?})", e.kind());
        }
        Self { name, pwm, raw: 0 }
    }

    fn set(&mut self, duty: f64) {
        if !(0.0..=1.0).contains(&duty) {
            debug!("PWM: {} duty {duty} out of range, ignored", self.name);
            return;
        }
        let max = self.pwm.max_duty_cycle();
        let raw = (duty * f64::from(max)).round() as u16;
        match self.pwm.set_duty_cycle(raw) {
            Ok(()) => self.raw = raw,
            Err(e) => warn!("PWM: {} write failed ({:?})", self.name, e.kind()),
        }
    }

    fn duty(&self) -> f64 {
        match self.pwm.max_duty_cycle() {
            0 => 0.0,
            max => f64::from(self.raw) / f64::from(max),
        }
    }
}

/// Heater + cooler PWM pair.
pub struct PwmActuators<H, C> {
    heater: Channel<H>,
    cooler: Channel<C>,
}

impl<H: SetDutyCycle, C: SetDutyCycle> PwmActuators<H, C> {
    /// Take ownership of both channels and switch them off.
    pub fn new(heater: H, cooler: C) -> Self {
        Self {
            heater: Channel::new("heater", heater),
            cooler: Channel::new("cooler", cooler),
        }
    }

    /// Give the channels back (e.g. to reconfigure the timer).
    pub fn release(self) -> (H, C) {
        (self.heater.pwm, self.cooler.pwm)
    }
}

impl<H: SetDutyCycle, C: SetDutyCycle> ActuatorPort for PwmActuators<H, C> {
    fn set_heater_duty(&mut self, duty: f64) {
        self.heater.set(duty);
    }

    fn set_cooler_duty(&mut self, duty: f64) {
        self.cooler.set(duty);
    }

    fn heater_duty(&self) -> f64 {
        self.heater.duty()
    }

    fn cooler_duty(&self) -> f64 {
        self.cooler.duty()
    }
}
