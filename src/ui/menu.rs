//! Screen order of the local interface.

/// One LCD screen.  The buttons act on whichever screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    /// Heater duty and cooler RPM.
    Overview,
    Setpoint,
    /// Shut the heater off and run the cooler flat out.
    CoolToMax,
    ControlSwitch,
    Kp,
    Ki,
    Kd,
    CoolerDuty,
    HeaterDuty,
    /// Duration and action for the next deadline-timer start.
    TimerSetup,
    /// Start/abort the deadline timer and show the time left.
    TimerStatus,
    /// Lock state of the local buttons.  Shown at power-up.
    Serial,
}

impl Menu {
    /// Every screen, in the order `Advance` visits them.
    pub const ALL: [Menu; 12] = [
        Menu::Overview,
        Menu::Setpoint,
        Menu::CoolToMax,
        Menu::ControlSwitch,
        Menu::Kp,
        Menu::Ki,
        Menu::Kd,
        Menu::CoolerDuty,
        Menu::HeaterDuty,
        Menu::TimerSetup,
        Menu::TimerStatus,
        Menu::Serial,
    ];

    /// Following screen; wraps from the last back to the first.
    pub fn next(self) -> Menu {
        let idx = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}
