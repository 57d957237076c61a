//! Port traits: the hexagonal boundary between the control core and the
//! peripherals around it.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Peripheral bring-up, PWM register programming, the LCD renderer and the
//! serial transport all live behind these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the core never touches hardware directly and every test runs on
//! the host against a mock.

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: thermistor and cooler tachometer.
pub trait SensorPort {
    /// Current process temperature in °C (unfiltered).
    fn read_temperature(&mut self) -> f64;

    /// Cooler fan speed measured over the last sampling window.
    fn read_tachometer_rpm(&mut self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: heater and cooler PWM outputs.
///
/// Duties are fractions in `[0, 1]`.  Implementations ignore values
/// outside that range and keep the previous duty.
pub trait ActuatorPort {
    fn set_heater_duty(&mut self, duty: f64);

    fn set_cooler_duty(&mut self, duty: f64);

    /// Duty currently applied to the heater.
    fn heater_duty(&self) -> f64;

    /// Duty currently applied to the cooler.
    fn cooler_duty(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Terminal line port (driven adapter: domain → serial)
// ───────────────────────────────────────────────────────────────

/// Acknowledgement / debug channel back to the terminal.
///
/// One call is one line; the transport appends its own line ending.
pub trait LinePort {
    fn emit_line(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Local interface port (driven adapter: domain ↔ LCD, buttons, LED)
// ───────────────────────────────────────────────────────────────

/// The three local push buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Lowers the value on the current screen / switches a function off.
    Decrease,
    /// Raises the value on the current screen / switches a function on.
    Increase,
    /// Moves to the next screen.
    Advance,
}

/// Level read from a button at sampling time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
    /// The pin is not configured as an input (shared with another peripheral).
    Unavailable,
}

impl ButtonState {
    pub fn is_pressed(self) -> bool {
        self == Self::Pressed
    }
}

/// Status indicator colour, derived from the setpoint error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Controller is off.
    Off,
    /// More than 1.5 °C below the setpoint (heating).
    BelowSetpoint,
    /// More than 1.5 °C above the setpoint (cooling).
    AboveSetpoint,
    /// Within ±1.5 °C of the setpoint.
    OnTarget,
}

pub trait LocalUiPort {
    /// Replace display line `index` (0 = top) with `text`.
    fn write_display_line(&mut self, index: u8, text: &str);

    fn read_button(&mut self, button: Button) -> ButtonState;

    fn set_indicator(&mut self, indicator: Indicator);
}

// ───────────────────────────────────────────────────────────────
// Aggregate
// ───────────────────────────────────────────────────────────────

/// Everything the control core needs from the board.
///
/// Blanket-implemented: any adapter that satisfies every port is a
/// `Hardware`.  This avoids juggling several mutable borrows of one
/// board object at the call sites.
pub trait Hardware: SensorPort + ActuatorPort + LinePort + LocalUiPort {}

impl<T: SensorPort + ActuatorPort + LinePort + LocalUiPort> Hardware for T {}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (domain → tick orchestrator)
// ───────────────────────────────────────────────────────────────

/// Periodic jobs the scheduler fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Sample the cooler tachometer.
    Tachometer,
    /// Filter the temperature and run the PID.
    Control,
    /// Poll buttons, redraw the display, update the indicator.
    LocalInterface,
    /// Count down the deadline timer.
    DeadlineTimer,
}

/// Callback invoked by the scheduler when a task is due.
///
/// Keeps the scheduler free of any reference to the control state, so
/// it can be tested with a recording delegate.
pub trait TaskDelegate {
    fn run_task(&mut self, task: Task);
}
