//! Front panel driven through the scheduler: buttons in, LCD and LED out.

use tempctrl::app::ports::{Button, Indicator};
use tempctrl::app::service::AppService;
use tempctrl::config::ControllerConfig;
use tempctrl::control::deadline::TimerAction;
use tempctrl::ui::Menu;

use super::mock_hw::MockHardware;

struct Panel {
    svc: AppService,
    hw: MockHardware,
}

impl Panel {
    fn new() -> Self {
        let mut hw = MockHardware::at(25.0);
        let mut svc = AppService::new(ControllerConfig::default());
        svc.start(&mut hw);
        Self { svc, hw }
    }

    /// Run up to and including the next interface refresh.
    fn refresh(&mut self) {
        for _ in 0..self.svc.config().interface_every_ticks {
            self.svc.tick(&mut self.hw);
        }
    }

    fn press(&mut self, buttons: &[Button]) {
        self.hw.pressed = buttons.to_vec();
        self.refresh();
        self.hw.pressed.clear();
    }

    fn advance(&mut self, times: usize) {
        for _ in 0..times {
            self.press(&[Button::Advance]);
        }
    }

    fn send(&mut self, text: &str) {
        for b in text.bytes() {
            self.svc.handle_byte(b, &mut self.hw);
        }
    }

    /// Unlock, then step from the serial screen to `menu`.
    fn open(&mut self, menu: Menu) {
        self.advance(1);
        let steps = Menu::ALL.iter().position(|&m| m == menu).unwrap() + 1;
        self.advance(steps);
        assert_eq!(self.svc.interface().menu(), menu);
    }

    fn top(&self) -> &str {
        &self.hw.display[0]
    }
}

#[test]
fn starts_locked_on_serial_screen() {
    let mut p = Panel::new();
    p.refresh();
    assert_eq!(p.svc.interface().menu(), Menu::Serial);
    assert_eq!(p.top(), "Buttons LOCKED");

    p.press(&[Button::Increase]);
    assert_eq!(p.top(), "Buttons LOCKED");

    p.press(&[Button::Advance]);
    assert!(p.svc.state().local_input_unlocked());
    assert_eq!(p.svc.interface().menu(), Menu::Serial);
    assert_eq!(p.top(), "Buttons ACTIVE");

    p.press(&[Button::Advance]);
    assert_eq!(p.svc.interface().menu(), Menu::Overview);
    assert_eq!(p.top(), "Aq=0 % Co=0000");
}

#[test]
fn unavailable_buttons_never_adjust() {
    let mut p = Panel::new();
    p.send("#st30;");
    p.open(Menu::Setpoint);
    p.hw.unavailable = vec![Button::Decrease, Button::Increase];
    p.press(&[Button::Increase]);
    assert_eq!(p.svc.state().pid.setpoint(), 30.0);

    p.hw.unavailable.clear();
    p.press(&[Button::Increase]);
    assert_eq!(p.svc.state().pid.setpoint(), 30.5);
}

#[test]
fn advance_cycles_through_every_screen() {
    let mut p = Panel::new();
    p.advance(1);
    let mut seen = Vec::new();
    for _ in 0..Menu::ALL.len() {
        p.advance(1);
        seen.push(p.svc.interface().menu());
    }
    assert_eq!(seen, Menu::ALL);
}

#[test]
fn advance_consumes_the_refresh() {
    let mut p = Panel::new();
    p.send("#st30;");
    p.open(Menu::Setpoint);
    p.press(&[Button::Advance, Button::Increase]);
    assert_eq!(p.svc.interface().menu(), Menu::CoolToMax);
    assert_eq!(p.svc.state().pid.setpoint(), 30.0);
}

#[test]
fn setpoint_steps_by_half_degree_inside_bounds() {
    let mut p = Panel::new();
    p.send("#st73,5;");
    p.open(Menu::Setpoint);

    p.press(&[Button::Increase]);
    assert_eq!(p.svc.state().pid.setpoint(), 74.0);
    assert_eq!(p.top(), "T SP= 74,0");
    p.press(&[Button::Increase]);
    assert_eq!(p.svc.state().pid.setpoint(), 74.0);

    p.press(&[Button::Decrease]);
    p.press(&[Button::Decrease]);
    assert_eq!(p.svc.state().pid.setpoint(), 73.0);
}

#[test]
fn gains_step_by_screen_size() {
    let mut p = Panel::new();
    p.open(Menu::Kp);
    p.press(&[Button::Increase]);
    assert_eq!(p.svc.state().pid.kp(), 11.0);
    assert_eq!(p.top(), "Kp = 11 ");

    p.advance(1);
    p.press(&[Button::Increase]);
    assert!((p.svc.state().pid.ki() - 0.15).abs() < 1e-12);
    assert_eq!(p.top(), "Ki = 0,15");

    p.advance(1);
    p.press(&[Button::Decrease]);
    assert_eq!(p.svc.state().pid.kd(), 19.0);
}

#[test]
fn cool_to_max_shuts_heater_and_runs_fan() {
    let mut p = Panel::new();
    p.send("#st40;#ss1;");
    p.open(Menu::CoolToMax);
    assert!(p.hw.heater > 0.0);

    p.press(&[Button::Increase]);
    assert!(p.svc.interface().cool_to_max());
    assert!(!p.svc.state().pid.is_on());
    assert_eq!(p.hw.heater, 0.0);
    assert_eq!(p.hw.cooler, 1.0);
    assert_eq!(p.top(), "COOLMAX: ON");

    p.press(&[Button::Decrease]);
    assert_eq!(p.hw.cooler, 0.0);
    assert_eq!(p.top(), "COOLMAX: OFF");
}

#[test]
fn control_switch_screen() {
    let mut p = Panel::new();
    p.open(Menu::ControlSwitch);
    assert_eq!(p.top(), "PID is OFF");
    p.press(&[Button::Increase]);
    assert!(p.svc.state().pid.is_on());
    assert_eq!(p.top(), "PID is ON");
    p.press(&[Button::Decrease]);
    assert!(!p.svc.state().pid.is_on());
}

#[test]
fn heater_duty_is_capped_from_the_panel() {
    let mut p = Panel::new();
    p.open(Menu::HeaterDuty);
    for _ in 0..12 {
        p.press(&[Button::Increase]);
    }
    assert_eq!(p.hw.heater, 0.5);
    assert_eq!(p.top(), "Aq:DC=50%");

    p.press(&[Button::Decrease]);
    assert!((p.hw.heater - 0.45).abs() < 1e-9);
}

#[test]
fn cooler_duty_screen_shows_rpm() {
    let mut p = Panel::new();
    p.hw.rpm = 1234;
    p.open(Menu::CoolerDuty);
    p.press(&[Button::Increase]);
    assert!((p.hw.cooler - 0.05).abs() < 1e-12);
    assert_eq!(p.top(), "C:DC=5 % R=1234");
}

#[test]
fn timer_setup_and_status_screens() {
    let mut p = Panel::new();
    p.open(Menu::TimerSetup);
    assert_eq!(p.top(), "P:ON  t:0000s");

    for _ in 0..3 {
        p.press(&[Button::Increase]);
    }
    assert_eq!(p.svc.state().timer_setup.duration_secs, 15);
    p.press(&[Button::Decrease, Button::Increase]);
    assert_eq!(p.svc.state().timer_setup.action, TimerAction::TurnOff);
    assert_eq!(p.top(), "P:OFF t:0015s");
    p.press(&[Button::Decrease]);
    assert_eq!(p.svc.state().timer_setup.duration_secs, 10);

    p.advance(1);
    assert_eq!(p.svc.interface().menu(), Menu::TimerStatus);
    p.press(&[Button::Increase]);
    assert!(p.svc.state().deadline.is_armed());
    assert_eq!(p.top(), "isON  t:0min10s");

    p.press(&[Button::Decrease]);
    assert!(!p.svc.state().deadline.is_armed());
    assert_eq!(p.top(), "isOFF t:0min00s");
}

#[test]
fn long_timer_setup_shows_minutes() {
    let mut p = Panel::new();
    p.send("#sn600;");
    p.open(Menu::TimerSetup);
    assert_eq!(p.top(), "P:ON  t:0010min");
    p.press(&[Button::Increase]);
    assert_eq!(p.svc.state().timer_setup.duration_secs, 660);
}

#[test]
fn indicator_follows_setpoint_error() {
    let mut p = Panel::new();
    p.refresh();
    assert_eq!(p.hw.indicator, Some(Indicator::Off));

    p.send("#st30;#ss1;");
    p.refresh();
    assert_eq!(p.hw.indicator, Some(Indicator::BelowSetpoint));

    p.send("#st26;");
    p.refresh();
    assert_eq!(p.hw.indicator, Some(Indicator::OnTarget));

    p.send("#st23;");
    p.refresh();
    assert_eq!(p.hw.indicator, Some(Indicator::AboveSetpoint));
}

#[test]
fn status_line_always_drawn() {
    let mut p = Panel::new();
    p.send("#st30;");
    p.refresh();
    assert_eq!(p.hw.display[1], "T=25,0C S=30,0C");
}
