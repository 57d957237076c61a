//! Query and assignment handlers.
//!
//! Each completed command produces at most one terminal line.  Values go
//! out through the fixed-width formatters in [`format`](super::format) so
//! the terminal layout never shifts.

use core::fmt::Write;

use crate::app::ports::{ActuatorPort, LinePort};
use crate::app::state::ControlState;
use crate::control::deadline::TimerAction;
use crate::error::{RangeError, Result};

use super::format::{float_to_text, text_to_float, uint_to_text};
use super::parser::{GetCode, SetCode};

/// Highest heater duty accepted from the terminal or the local buttons.
pub const HEATER_DUTY_CAP: f64 = 0.5;

/// Rendered width of decimal values in query replies.
const QUERY_WIDTH: usize = 6;
const RPM_DIGITS: usize = 7;
const SECONDS_DIGITS: usize = 6;

/// One terminal line.
pub type Line = heapless::String<64>;

/// Refuse heater duties above [`HEATER_DUTY_CAP`].
pub fn check_heater_duty(duty: f64) -> Result<()> {
    if duty > HEATER_DUTY_CAP {
        return Err(RangeError::HeaterDutyAboveCap.into());
    }
    Ok(())
}

fn line(args: core::fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    // A line that overflows is truncated; every fixed text fits.
    let _ = out.write_fmt(args);
    out
}

// ── Queries ───────────────────────────────────────────────────

/// Answer `#g<code>;`.
pub fn run_query(code: GetCode, state: &ControlState, hw: &mut (impl ActuatorPort + LinePort)) {
    let reply = match code {
        GetCode::Temperature => line(format_args!(
            "Current Temperature = {}",
            float_to_text(state.readings.temperature, QUERY_WIDTH)
        )),
        GetCode::CoolerDuty => line(format_args!(
            "Current Cooler DC = {}",
            float_to_text(hw.cooler_duty(), QUERY_WIDTH)
        )),
        GetCode::HeaterDuty => line(format_args!(
            "Current Heater DC = {}",
            float_to_text(hw.heater_duty(), QUERY_WIDTH)
        )),
        GetCode::Kp => line(format_args!("Kp = {}", float_to_text(state.pid.kp(), QUERY_WIDTH))),
        GetCode::Ki => line(format_args!("Ki = {}", float_to_text(state.pid.ki(), QUERY_WIDTH))),
        GetCode::Kd => line(format_args!("Kd = {}", float_to_text(state.pid.kd(), QUERY_WIDTH))),
        GetCode::ControlStatus => {
            if state.pid.is_on() {
                line(format_args!("PID is on"))
            } else {
                line(format_args!("PID is off"))
            }
        }
        GetCode::Setpoint => line(format_args!(
            "Temp setPoint = {}",
            float_to_text(state.pid.setpoint(), QUERY_WIDTH)
        )),
        GetCode::CoolerRpm => line(format_args!(
            "Cooler RPM = {}",
            uint_to_text(state.readings.tachometer_rpm, RPM_DIGITS)
        )),
        GetCode::TimerStatus => {
            if state.deadline.is_armed() {
                line(format_args!(
                    "Timer is ON, with {} seconds left",
                    uint_to_text(state.deadline.remaining_ms() / 1000, SECONDS_DIGITS)
                ))
            } else {
                line(format_args!("Timer is OFF"))
            }
        }
    };
    hw.emit_line(&reply);
}

// ── Assignments ───────────────────────────────────────────────

/// Apply `#s<code><raw>;`.
pub fn run_assignment(
    code: SetCode,
    raw: &str,
    state: &mut ControlState,
    hw: &mut (impl ActuatorPort + LinePort),
) {
    let value = text_to_float(raw);

    match code {
        SetCode::Setpoint => {
            // Rejected setpoints are dropped without a reply.
            if state.pid.set_temperature_setpoint(value).is_ok() {
                hw.emit_line(&line(format_args!("Temperature setpoint set to: {raw}")));
            }
        }
        SetCode::CoolerDuty => {
            hw.set_cooler_duty(value);
            hw.emit_line(&line(format_args!("Cooler DC set to: {raw}")));
        }
        SetCode::HeaterDuty => {
            if check_heater_duty(value).is_ok() {
                hw.set_heater_duty(value);
                hw.emit_line(&line(format_args!("Heater DC set to: {raw}")));
            } else {
                hw.emit_line("#aError DC>0,5;");
            }
        }
        SetCode::Kp => {
            state.pid.set_kp(value);
            hw.emit_line(&line(format_args!("Kp set to: {raw}")));
        }
        SetCode::Ki => {
            state.pid.set_ki(value);
            hw.emit_line(&line(format_args!("Ki set to: {raw}")));
        }
        SetCode::Kd => {
            state.pid.set_kd(value);
            hw.emit_line(&line(format_args!("Kd set to: {raw}")));
        }
        SetCode::ControlSwitch => {
            if value == 1.0 {
                state.pid.turn_on();
                hw.emit_line("PID is ON");
            } else {
                state.pid.turn_off(hw);
                hw.emit_line("PID is OFF");
            }
        }
        SetCode::TimerAction => {
            let action = TimerAction::from_flag(value == 1.0);
            state.timer_setup.action = action;
            match action {
                TimerAction::TurnOn => hw.emit_line("Timer will turn PID ON"),
                TimerAction::TurnOff => hw.emit_line("Timer will turn PID OFF"),
            }
        }
        SetCode::TimerDuration => {
            // Float-to-int casts saturate, so huge inputs land on the cap.
            state.timer_setup.set_duration(value.floor() as u32);
            hw.emit_line(&line(format_args!(
                "Timer is going to be set to: {} seconds",
                uint_to_text(state.timer_setup.duration_secs, SECONDS_DIGITS)
            )));
        }
        SetCode::TimerSwitch => {
            if value == 1.0 {
                state.start_deadline();
                hw.emit_line("Timer turned ON");
            } else {
                state.deadline.abort();
                hw.emit_line("Timer turned OFF");
            }
        }
        SetCode::LocalUnlock => {
            if value != 0.0 {
                state.unlock_local_input();
                hw.emit_line("Local buttons activated");
            }
        }
    }
}
