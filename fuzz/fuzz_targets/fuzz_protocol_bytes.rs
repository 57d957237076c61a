//! Fuzz target: `AppService::handle_byte`
//!
//! Streams arbitrary bytes through the command parser and dispatcher and
//! asserts that nothing panics, the value buffer stays bounded and the
//! heater never leaves its cap.
//!
//! cargo fuzz run fuzz_protocol_bytes

#![no_main]

use libfuzzer_sys::fuzz_target;
use tempctrl::app::ports::{ActuatorPort, LinePort};
use tempctrl::app::service::AppService;
use tempctrl::config::ControllerConfig;
use tempctrl::protocol::dispatch::HEATER_DUTY_CAP;
use tempctrl::protocol::parser::MAX_VALUE_LEN;

#[derive(Default)]
struct Sink {
    heater: f64,
    cooler: f64,
}

impl ActuatorPort for Sink {
    fn set_heater_duty(&mut self, duty: f64) {
        if (0.0..=1.0).contains(&duty) {
            self.heater = duty;
        }
    }
    fn set_cooler_duty(&mut self, duty: f64) {
        if (0.0..=1.0).contains(&duty) {
            self.cooler = duty;
        }
    }
    fn heater_duty(&self) -> f64 {
        self.heater
    }
    fn cooler_duty(&self) -> f64 {
        self.cooler
    }
}

impl LinePort for Sink {
    fn emit_line(&mut self, text: &str) {
        assert!(text.len() <= 64, "reply exceeds line buffer");
    }
}

fuzz_target!(|data: &[u8]| {
    let mut service = AppService::new(ControllerConfig::default());
    let mut hw = Sink::default();

    for &byte in data {
        let _ = service.handle_byte(byte, &mut hw);
        assert!(service.parser().value().len() <= MAX_VALUE_LEN);
        assert!(hw.heater <= HEATER_DUTY_CAP, "heater above cap");
    }
});
