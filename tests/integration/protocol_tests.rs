//! Terminal protocol end-to-end: bytes in, reply lines and state out.

use tempctrl::app::service::AppService;
use tempctrl::app::shared::SharedService;
use tempctrl::config::ControllerConfig;
use tempctrl::control::deadline::TimerAction;
use tempctrl::protocol::parser::{Discard, GetCode, ParserState, Step};

use super::mock_hw::MockHardware;

fn started(temperature: f64) -> (AppService, MockHardware) {
    let mut hw = MockHardware::at(temperature);
    let mut svc = AppService::new(ControllerConfig::default());
    svc.start(&mut hw);
    (svc, hw)
}

fn send(svc: &mut AppService, hw: &mut MockHardware, text: &str) -> Vec<Step> {
    text.bytes().map(|b| svc.handle_byte(b, hw)).collect()
}

#[test]
fn temperature_query_reports_filtered_value() {
    let (mut svc, mut hw) = started(23.4);
    svc.tick(&mut hw);
    send(&mut svc, &mut hw, "#gt;");
    let line = hw.last_line().unwrap();
    assert!(line.starts_with("Current Temperature = "), "{line}");
    assert!(line.contains("23,4"), "{line}");
}

#[test]
fn heater_above_cap_is_refused() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#sa0,6;");
    assert_eq!(hw.take_lines(), ["#aError DC>0,5;"]);
    assert!(hw.heater_writes().is_empty());
    assert_eq!(hw.heater, 0.0);
}

#[test]
fn setpoint_assignment_echoes_and_applies() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#st25,0;#gg;");
    assert_eq!(svc.state().pid.setpoint(), 25.0);
    assert_eq!(
        hw.take_lines(),
        ["Temperature setpoint set to: 25,0", "Temp setPoint = 25,000"]
    );
}

#[test]
fn out_of_range_setpoint_is_silent() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#st80;#st22,9;");
    assert!(hw.lines.is_empty());
    assert_eq!(svc.state().pid.setpoint(), 0.0);
}

#[test]
fn unknown_selector_emits_nothing() {
    let (mut svc, mut hw) = started(25.0);
    let steps = send(&mut svc, &mut hw, "#x");
    assert_eq!(steps[1], Step::Discarded(Discard::UnknownSelector(b'x')));
    assert_eq!(svc.parser().state(), ParserState::Idle);
    assert!(hw.lines.is_empty());
}

#[test]
fn noise_between_commands_is_ignored() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "hello\r\n#gs;;;\n#g");
    send(&mut svc, &mut hw, "#sp12;");
    assert_eq!(hw.take_lines(), ["PID is off", "Kp set to: 12"]);
    assert_eq!(svc.state().pid.kp(), 12.0);
}

#[test]
fn sentinel_restarts_a_broken_command() {
    let (mut svc, mut hw) = started(25.0);
    let steps = send(&mut svc, &mut hw, "#st3#gp;");
    assert_eq!(steps.last(), Some(&Step::Query(GetCode::Kp)));
    assert_eq!(hw.take_lines(), ["Kp = 10,000"]);
}

#[test]
fn over_long_value_is_truncated_then_capped() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#sn123456789;");
    assert_eq!(svc.state().timer_setup.duration_secs, 599_940);
    assert_eq!(
        hw.last_line(),
        Some("Timer is going to be set to: 599940 seconds")
    );
}

#[test]
fn timer_programmed_over_the_wire_switches_pid_off() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#st40;#ss1;#sn3;#sb0;#sm1;");
    assert_eq!(svc.state().timer_setup.action, TimerAction::TurnOff);
    svc.tick(&mut hw);
    assert!(hw.heater > 0.0);

    for _ in 0..29 {
        svc.tick(&mut hw);
    }
    assert!(!svc.state().pid.is_on());
    assert_eq!(hw.heater, 0.0);

    hw.take_lines();
    send(&mut svc, &mut hw, "#gm;#gs;");
    assert_eq!(hw.take_lines(), ["Timer is OFF", "PID is off"]);
}

#[test]
fn timer_status_counts_down() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#sn60;#sm1;");
    for _ in 0..105 {
        svc.tick(&mut hw);
    }
    hw.take_lines();
    send(&mut svc, &mut hw, "#gm;");
    // 60 s − 10.5 s, whole seconds
    assert_eq!(hw.last_line(), Some("Timer is ON, with 000049 seconds left"));
}

#[test]
fn duty_queries_read_back_actuators() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#sc0,75;#sa0,25;#gc;#ga;");
    assert_eq!(
        hw.take_lines(),
        [
            "Cooler DC set to: 0,75",
            "Heater DC set to: 0,25",
            "Current Cooler DC = 0,7500",
            "Current Heater DC = 0,2500",
        ]
    );
}

#[test]
fn rpm_query_after_tachometer_window() {
    let (mut svc, mut hw) = started(25.0);
    hw.rpm = 3120;
    for _ in 0..10 {
        svc.tick(&mut hw);
    }
    send(&mut svc, &mut hw, "#gr;");
    assert_eq!(hw.last_line(), Some("Cooler RPM = 0003120"));
}

#[test]
fn unlock_over_the_wire() {
    let (mut svc, mut hw) = started(25.0);
    send(&mut svc, &mut hw, "#sk0;");
    assert!(!svc.state().local_input_unlocked());
    send(&mut svc, &mut hw, "#sk1;");
    assert!(svc.state().local_input_unlocked());
    assert_eq!(hw.take_lines(), ["Local buttons activated"]);
}

#[test]
fn shared_service_serialises_both_entry_points() {
    let shared = SharedService::new(
        AppService::new(ControllerConfig::default()),
        MockHardware::at(30.0),
    );
    for b in b"#st35;#ss1;" {
        shared.on_byte(*b);
    }
    shared.on_tick();
    assert_eq!(shared.on_byte(b'#'), Step::Pending);

    let (svc, hw) = shared.into_parts();
    assert!(svc.state().pid.is_on());
    assert_eq!(svc.state().pid.setpoint(), 35.0);
    assert_eq!(hw.lines, ["Temperature setpoint set to: 35", "PID is ON"]);
    assert!(hw.heater > 0.0);
}
