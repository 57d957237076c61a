//! Tick fan-out through the full service: which task touched what, when.

use tempctrl::app::ports::Indicator;
use tempctrl::app::service::AppService;
use tempctrl::config::ControllerConfig;

use super::mock_hw::{ActuatorCall, MockHardware};

fn started(hw: &mut MockHardware) -> AppService {
    let mut svc = AppService::new(ControllerConfig::default());
    svc.start(hw);
    svc
}

fn feed(svc: &mut AppService, hw: &mut MockHardware, text: &str) {
    for b in text.bytes() {
        svc.handle_byte(b, hw);
    }
}

#[test]
fn control_runs_every_tick_only_when_enabled() {
    let mut hw = MockHardware::at(30.0);
    let mut svc = started(&mut hw);

    for _ in 0..5 {
        svc.tick(&mut hw);
    }
    assert!(hw.heater_writes().is_empty());

    feed(&mut svc, &mut hw, "#st31;#ss1;");
    for _ in 0..5 {
        svc.tick(&mut hw);
    }
    assert_eq!(hw.heater_writes().len(), 5);
}

#[test]
fn heater_command_stays_in_unit_range() {
    let mut hw = MockHardware::at(20.0);
    let mut svc = started(&mut hw);
    feed(&mut svc, &mut hw, "#st74;#ss1;");

    for step in 0..200 {
        // Overshoot the setpoint halfway through.
        hw.temperature = if step < 100 { 20.0 } else { 90.0 };
        svc.tick(&mut hw);
    }
    let writes = hw.heater_writes();
    assert_eq!(writes.len(), 200);
    assert!(writes.iter().all(|d| (0.0..=1.0).contains(d)));
    assert_eq!(writes[0], 1.0);
    assert_eq!(*writes.last().unwrap(), 0.0);
}

#[test]
fn interface_redraws_every_fifth_tick() {
    let mut hw = MockHardware::at(25.0);
    let mut svc = started(&mut hw);

    for _ in 0..4 {
        svc.tick(&mut hw);
    }
    assert!(hw.display[1].is_empty());
    assert_eq!(hw.indicator, None);

    svc.tick(&mut hw);
    assert_eq!(hw.display[1], "T=25,0C S=0,00C");
    assert_eq!(hw.indicator, Some(Indicator::Off));
}

#[test]
fn tachometer_sampled_every_tenth_tick() {
    let mut hw = MockHardware::at(25.0);
    let mut svc = started(&mut hw);
    hw.rpm = 900;

    for _ in 0..9 {
        svc.tick(&mut hw);
    }
    assert_eq!(svc.state().readings.tachometer_rpm, 0);
    svc.tick(&mut hw);
    assert_eq!(svc.state().readings.tachometer_rpm, 900);

    hw.rpm = 1500;
    for _ in 0..9 {
        svc.tick(&mut hw);
    }
    assert_eq!(svc.state().readings.tachometer_rpm, 900);
    svc.tick(&mut hw);
    assert_eq!(svc.state().readings.tachometer_rpm, 1500);
}

#[test]
fn deadline_turn_on_keeps_running_controller() {
    let mut hw = MockHardware::at(29.0);
    let mut svc = started(&mut hw);
    feed(&mut svc, &mut hw, "#st30;#ss1;#sn1;#sb1;#sm1;");

    for _ in 0..9 {
        svc.tick(&mut hw);
    }
    let integral = svc.state().pid.integral();
    assert!(integral > 0.0);

    svc.tick(&mut hw);
    assert!(!svc.state().deadline.is_armed());
    assert!(svc.state().pid.is_on());
    // Tick 10 integrated once more, the timer did not reset it.
    assert!(svc.state().pid.integral() >= integral);
}

#[test]
fn readings_track_actuator_duties() {
    let mut hw = MockHardware::at(25.0);
    let mut svc = started(&mut hw);
    feed(&mut svc, &mut hw, "#sc0,4;");
    assert_eq!(hw.calls, [ActuatorCall::Cooler(0.4)]);

    svc.tick(&mut hw);
    assert_eq!(svc.state().readings.cooler_duty, 0.4);
    assert_eq!(svc.state().readings.heater_duty, 0.0);
}

#[test]
fn bad_sample_does_not_latch_heater() {
    let mut hw = MockHardware::at(20.0);
    let mut svc = started(&mut hw);
    feed(&mut svc, &mut hw, "#st74;#ss1;");
    for _ in 0..5 {
        svc.tick(&mut hw);
    }
    assert_eq!(hw.heater, 1.0);

    hw.temperature = f64::NAN;
    svc.tick(&mut hw);
    hw.temperature = f64::INFINITY;
    svc.tick(&mut hw);

    hw.temperature = 90.0;
    for _ in 0..50 {
        svc.tick(&mut hw);
    }
    assert!(svc.state().readings.temperature.is_finite());
    assert_eq!(hw.heater, 0.0);
}
