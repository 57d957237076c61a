//! LCD + push-button front panel.
//!
//! Runs from the scheduler's interface slot.  Each run polls the three
//! buttons once, applies at most one screen's adjustment, redraws both
//! display lines and refreshes the indicator.
//!
//! The buttons start locked.  Until they are unlocked (with `Advance` on
//! the serial screen or `#sk1;` from the terminal) only `Advance` is
//! honoured, and only on the serial screen.

use core::fmt::Write;

use log::info;

use crate::app::ports::{ActuatorPort, Button, Indicator, LocalUiPort};
use crate::app::state::{ControlState, TIMER_MAX_SECS};
use crate::control::deadline::TimerAction;
use crate::protocol::dispatch::HEATER_DUTY_CAP;
use crate::protocol::format::{float_to_text, uint_to_text};

use super::menu::Menu;

/// Width of one LCD line.
pub const DISPLAY_COLUMNS: usize = 16;

/// One rendered display line.
pub type DisplayLine = heapless::String<DISPLAY_COLUMNS>;

/// Setpoint error (°C) beyond which the indicator leaves `OnTarget`.
pub const INDICATOR_BAND_C: f64 = 1.5;

const SETPOINT_STEP_C: f64 = 0.5;
const KP_STEP: f64 = 1.0;
const KI_STEP: f64 = 0.05;
const KD_STEP: f64 = 1.0;
const DUTY_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, Default)]
struct Buttons {
    decrease: bool,
    increase: bool,
    advance: bool,
}

impl Buttons {
    fn poll(hw: &mut impl LocalUiPort) -> Self {
        Self {
            decrease: hw.read_button(Button::Decrease).is_pressed(),
            increase: hw.read_button(Button::Increase).is_pressed(),
            advance: hw.read_button(Button::Advance).is_pressed(),
        }
    }
}

/// Front-panel state machine.
#[derive(Debug, Clone)]
pub struct LocalInterface {
    menu: Menu,
    cool_to_max: bool,
}

impl Default for LocalInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalInterface {
    pub fn new() -> Self {
        Self {
            menu: Menu::Serial,
            cool_to_max: false,
        }
    }

    pub fn menu(&self) -> Menu {
        self.menu
    }

    pub fn cool_to_max(&self) -> bool {
        self.cool_to_max
    }

    /// Poll, adjust, redraw.
    pub fn tick(&mut self, state: &mut ControlState, hw: &mut (impl ActuatorPort + LocalUiPort)) {
        let buttons = Buttons::poll(hw);

        if buttons.advance {
            self.advance(state);
        } else if state.local_input_unlocked() {
            self.adjust(buttons, state, hw);
        }

        let top = self.render_screen(state, &*hw);
        let bottom = render_status_line(state);
        hw.write_display_line(0, &top);
        hw.write_display_line(1, &bottom);
        hw.set_indicator(indicator_for(state));
    }

    // ── Navigation ────────────────────────────────────────────

    fn advance(&mut self, state: &mut ControlState) {
        if self.menu == Menu::Serial && !state.local_input_unlocked() {
            state.unlock_local_input();
            return;
        }
        self.menu = self.menu.next();
    }

    // ── Adjustments ───────────────────────────────────────────

    fn adjust(
        &mut self,
        buttons: Buttons,
        state: &mut ControlState,
        hw: &mut (impl ActuatorPort + LocalUiPort),
    ) {
        let Buttons {
            decrease, increase, ..
        } = buttons;
        let pid = &mut state.pid;

        match self.menu {
            Menu::Setpoint => {
                // Steps past either bound are refused by the controller.
                let sp = pid.setpoint();
                if decrease {
                    let _ = pid.set_temperature_setpoint(sp - SETPOINT_STEP_C);
                } else if increase {
                    let _ = pid.set_temperature_setpoint(sp + SETPOINT_STEP_C);
                }
            }
            Menu::CoolToMax => {
                if decrease && self.cool_to_max {
                    self.cool_to_max = false;
                    hw.set_cooler_duty(0.0);
                    info!("Cool-to-max off");
                } else if increase && !self.cool_to_max {
                    self.cool_to_max = true;
                    pid.turn_off(hw);
                    hw.set_heater_duty(0.0);
                    hw.set_cooler_duty(1.0);
                    info!("Cool-to-max on");
                }
            }
            Menu::ControlSwitch => {
                if decrease {
                    pid.turn_off(hw);
                } else if increase {
                    pid.turn_on();
                }
            }
            Menu::Kp => step_gain(decrease, increase, KP_STEP, pid.kp(), |v| pid.set_kp(v)),
            Menu::Ki => step_gain(decrease, increase, KI_STEP, pid.ki(), |v| pid.set_ki(v)),
            Menu::Kd => step_gain(decrease, increase, KD_STEP, pid.kd(), |v| pid.set_kd(v)),
            Menu::CoolerDuty => {
                let duty = hw.cooler_duty();
                if decrease {
                    hw.set_cooler_duty((duty - DUTY_STEP).max(0.0));
                } else if increase {
                    hw.set_cooler_duty((duty + DUTY_STEP).min(1.0));
                }
            }
            Menu::HeaterDuty => {
                let duty = hw.heater_duty();
                if decrease {
                    hw.set_heater_duty((duty - DUTY_STEP).max(0.0));
                } else if increase {
                    hw.set_heater_duty((duty + DUTY_STEP).min(HEATER_DUTY_CAP));
                }
            }
            Menu::TimerSetup => {
                let setup = &mut state.timer_setup;
                if decrease && increase {
                    setup.action = match setup.action {
                        TimerAction::TurnOn => TimerAction::TurnOff,
                        TimerAction::TurnOff => TimerAction::TurnOn,
                    };
                } else if decrease {
                    let secs = setup.duration_secs;
                    setup.set_duration(secs.saturating_sub(duration_step_down(secs)));
                } else if increase {
                    let secs = setup.duration_secs;
                    setup.set_duration(secs + duration_step_up(secs));
                }
            }
            Menu::TimerStatus => {
                if decrease {
                    state.deadline.abort();
                } else if increase {
                    state.start_deadline();
                }
            }
            Menu::Overview | Menu::Serial => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────

    fn render_screen(&self, state: &ControlState, hw: &impl ActuatorPort) -> DisplayLine {
        let mut out = DisplayLine::new();
        let rpm = state.readings.tachometer_rpm;
        let pid = &state.pid;

        // Every screen fits in 16 columns; an overflow would only truncate.
        let _ = match self.menu {
            Menu::Overview => write!(
                out,
                "Aq={}% Co={}",
                float_to_text(100.0 * hw.heater_duty(), 2),
                uint_to_text(rpm, 4)
            ),
            Menu::Setpoint => write!(out, "T SP= {}", float_to_text(pid.setpoint(), 4)),
            Menu::CoolToMax => write!(out, "COOLMAX: {}", on_off(self.cool_to_max)),
            Menu::ControlSwitch => write!(out, "PID is {}", on_off(pid.is_on())),
            Menu::Kp => write!(out, "Kp = {}", float_to_text(pid.kp(), 3)),
            Menu::Ki => write!(out, "Ki = {}", float_to_text(pid.ki(), 4)),
            Menu::Kd => write!(out, "Kd = {}", float_to_text(pid.kd(), 3)),
            Menu::CoolerDuty => write!(
                out,
                "C:DC={}% R={}",
                float_to_text(100.0 * hw.cooler_duty(), 2),
                uint_to_text(rpm, 4)
            ),
            Menu::HeaterDuty => {
                write!(out, "Aq:DC={}%", float_to_text(100.0 * hw.heater_duty(), 2))
            }
            Menu::TimerSetup => {
                let setup = state.timer_setup;
                let action = match setup.action {
                    TimerAction::TurnOn => "ON ",
                    TimerAction::TurnOff => "OFF",
                };
                if setup.duration_secs < 300 {
                    write!(out, "P:{action} t:{}s", uint_to_text(setup.duration_secs, 4))
                } else {
                    write!(
                        out,
                        "P:{action} t:{}min",
                        uint_to_text(setup.duration_secs / 60, 4)
                    )
                }
            }
            Menu::TimerStatus => {
                let status = if state.deadline.is_armed() { "ON " } else { "OFF" };
                let left_secs = state.deadline.remaining_ms() / 1000;
                if left_secs >= 600 {
                    write!(out, "is{status} t:{}min", uint_to_text(left_secs / 60, 4))
                } else {
                    write!(
                        out,
                        "is{status} t:{}min{}s",
                        uint_to_text(left_secs / 60, 1),
                        uint_to_text(left_secs % 60, 2)
                    )
                }
            }
            Menu::Serial => {
                if state.local_input_unlocked() {
                    write!(out, "Buttons ACTIVE")
                } else {
                    write!(out, "Buttons LOCKED")
                }
            }
        };
        out
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn step_gain(decrease: bool, increase: bool, step: f64, current: f64, mut set: impl FnMut(f64)) {
    if decrease {
        set(current - step);
    } else if increase {
        set(current + step);
    }
}

/// Increment for the timer-setup screen: finer steps for short timers.
fn duration_step_up(secs: u32) -> u32 {
    match secs {
        0..300 => 5,
        300..3600 => 60,
        s if s < TIMER_MAX_SECS => 300,
        _ => 0,
    }
}

fn duration_step_down(secs: u32) -> u32 {
    match secs {
        0 => 0,
        1..300 => 5,
        300..3600 => 60,
        _ => 300,
    }
}

/// Bottom line: `T=<temp>C S=<setpoint>C`.
pub fn render_status_line(state: &ControlState) -> DisplayLine {
    let mut out = DisplayLine::new();
    let _ = write!(
        out,
        "T={}C S={}C",
        float_to_text(state.readings.temperature, 4),
        float_to_text(state.pid.setpoint(), 4)
    );
    out
}

/// Indicator colour for the current error.
pub fn indicator_for(state: &ControlState) -> Indicator {
    if !state.pid.is_on() {
        return Indicator::Off;
    }
    let error = state.pid.setpoint() - state.readings.temperature;
    if error > INDICATOR_BAND_C {
        Indicator::BelowSetpoint
    } else if error < -INDICATOR_BAND_C {
        Indicator::AboveSetpoint
    } else {
        Indicator::OnTarget
    }
}
