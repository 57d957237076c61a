//! Simulated heater/cooler plant for the host build.
//!
//! A lumped thermal mass: the heater pumps energy in, losses to ambient
//! grow with the cooler fan.  The real drivers sit on top of simulated
//! peripherals (PWM channels, a button pin, the tach pulse counter) so
//! the host binary runs the same driver code the board does.
//!
//! Replies go to stdout and are mirrored into the log through
//! [`LogLineSink`]; display and indicator changes are logged.
//!
//! The plant does not evolve on its own: the host loop calls
//! [`SimulatedPlant::advance`] once per tick.  Reading the sensor has no
//! side effects.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use log::{debug, info};

use crate::app::ports::{
    ActuatorPort, Button, ButtonState, Indicator, LinePort, LocalUiPort, SensorPort,
};
use crate::config::ControllerConfig;
use crate::drivers::button::ButtonBank;
use crate::drivers::pwm::PwmActuators;
use crate::drivers::tachometer::{PULSES_PER_REV, PulseCounter};
use crate::ui::local::DisplayLine;

use super::log_sink::LogLineSink;

// ── Simulated peripherals ─────────────────────────────────────

/// 16-bit PWM compare register.
#[derive(Debug, Default)]
pub struct SimPwm {
    raw: u16,
}

impl PwmErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.raw = duty;
        Ok(())
    }
}

/// Button input held at a fixed level (pull-up: `true` = released).
#[derive(Debug)]
pub struct SimPin {
    high: bool,
}

impl SimPin {
    pub fn released() -> Self {
        Self { high: true }
    }
}

impl PinErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}

// ── Plant model ───────────────────────────────────────────────

/// Thermal parameters of the simulated plant.
#[derive(Debug, Clone, Copy)]
pub struct PlantModel {
    pub ambient_c: f64,
    /// °C/s at full heater with no losses.
    pub heater_rate_c_per_s: f64,
    /// Passive loss coefficient (1/s).
    pub loss_per_s: f64,
    /// Extra loss factor at full cooler.
    pub cooler_gain: f64,
    pub fan_max_rpm: u32,
}

impl Default for PlantModel {
    fn default() -> Self {
        Self {
            ambient_c: 22.0,
            heater_rate_c_per_s: 1.2,
            loss_per_s: 0.02,
            cooler_gain: 3.0,
            fan_max_rpm: 4000,
        }
    }
}

pub struct SimulatedPlant {
    model: PlantModel,
    temperature: f64,
    dt_secs: f64,
    tach_window_ms: u32,
    pwm: PwmActuators<SimPwm, SimPwm>,
    buttons: ButtonBank<SimPin>,
    tach: PulseCounter,
    display: [DisplayLine; 2],
    indicator: Indicator,
    transcript: LogLineSink,
}

impl SimulatedPlant {
    pub fn new(config: &ControllerConfig, model: PlantModel) -> Self {
        let buttons = ButtonBank::new(
            Some(SimPin::released()),
            Some(SimPin::released()),
            Some(SimPin::released()),
        );
        Self {
            temperature: model.ambient_c,
            model,
            dt_secs: f64::from(config.tick_period_ms) / 1000.0,
            tach_window_ms: config.tachometer_window_ms(),
            pwm: PwmActuators::new(SimPwm::default(), SimPwm::default()),
            buttons,
            tach: PulseCounter::new(),
            display: [DisplayLine::new(), DisplayLine::new()],
            indicator: Indicator::Off,
            transcript: LogLineSink::new(),
        }
    }

    /// Advance the thermal model by one tick.
    pub fn advance(&mut self) {
        let m = &self.model;
        let heat = m.heater_rate_c_per_s * self.pwm.heater_duty();
        let loss = m.loss_per_s
            * (1.0 + m.cooler_gain * self.pwm.cooler_duty())
            * (self.temperature - m.ambient_c);
        self.temperature += (heat - loss) * self.dt_secs;
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn display(&self) -> &[DisplayLine; 2] {
        &self.display
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Reply lines written so far.
    pub fn replies_sent(&self) -> usize {
        self.transcript.emitted()
    }
}

impl SensorPort for SimulatedPlant {
    fn read_temperature(&mut self) -> f64 {
        self.temperature
    }

    fn read_tachometer_rpm(&mut self) -> u32 {
        let rpm = f64::from(self.model.fan_max_rpm) * self.pwm.cooler_duty();
        let pulses = rpm * f64::from(PULSES_PER_REV) * f64::from(self.tach_window_ms) / 60_000.0;
        self.tach.add(pulses.round() as u32);
        self.tach.sample_rpm(self.tach_window_ms)
    }
}

impl ActuatorPort for SimulatedPlant {
    fn set_heater_duty(&mut self, duty: f64) {
        self.pwm.set_heater_duty(duty);
    }

    fn set_cooler_duty(&mut self, duty: f64) {
        self.pwm.set_cooler_duty(duty);
    }

    fn heater_duty(&self) -> f64 {
        self.pwm.heater_duty()
    }

    fn cooler_duty(&self) -> f64 {
        self.pwm.cooler_duty()
    }
}

impl LinePort for SimulatedPlant {
    fn emit_line(&mut self, text: &str) {
        println!("{text}");
        self.transcript.emit_line(text);
    }
}

impl LocalUiPort for SimulatedPlant {
    fn write_display_line(&mut self, index: u8, text: &str) {
        let Some(line) = self.display.get_mut(usize::from(index)) else {
            return;
        };
        if line.as_str() != text {
            line.clear();
            let _ = line.push_str(text);
            debug!("LCD{index} | {text}");
        }
    }

    fn read_button(&mut self, button: Button) -> ButtonState {
        self.buttons.read(button)
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        if indicator != self.indicator {
            info!("LED | {:?} -> {:?}", self.indicator, indicator);
            self.indicator = indicator;
        }
    }
}
