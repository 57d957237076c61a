//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the control state, the scheduler, the protocol
//! parser and the front panel.  It has exactly two entry points, one per
//! interrupt source:
//!
//! - [`tick`](AppService::tick): periodic timer, fans out via the scheduler;
//! - [`handle_byte`](AppService::handle_byte): one received serial byte.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ LinePort
//!                 │         AppService          │
//! ActuatorPort ◀──│ Filter · PID · Timer · UI   │ ◀─▶ LocalUiPort
//!                 └─────────────────────────────┘
//! ```
//!
//! Neither entry point blocks; both run to completion under the lock
//! held by [`SharedService`](super::shared::SharedService).

use log::{info, warn};

use crate::config::ControllerConfig;
use crate::protocol::dispatch::{run_assignment, run_query};
use crate::protocol::parser::{ProtocolParser, Step};
use crate::scheduler::Scheduler;
use crate::ui::LocalInterface;

use super::ports::{ActuatorPort, Hardware, LinePort, Task, TaskDelegate};
use super::state::ControlState;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: ControllerConfig,
    scheduler: Scheduler,
    state: ControlState,
    parser: ProtocolParser,
    interface: LocalInterface,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: ControllerConfig) -> Self {
        let scheduler = Scheduler::from_config(&config);
        let state = ControlState::new(&config);
        Self {
            config,
            scheduler,
            state,
            parser: ProtocolParser::new(),
            interface: LocalInterface::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Seed the filter with a first raw reading and capture the duties.
    pub fn start(&mut self, hw: &mut impl Hardware) {
        let initial = hw.read_temperature();
        self.state.filter.init(initial);
        self.state.readings.temperature = initial;
        self.refresh_duties(hw);
        info!(
            "AppService started: T={initial:.1} C, tick {} ms",
            self.config.tick_period_ms
        );
    }

    // ── Interrupt entry points ────────────────────────────────

    /// One hardware tick.
    pub fn tick(&mut self, hw: &mut impl Hardware) {
        let mut runner = TaskRunner {
            state: &mut self.state,
            interface: &mut self.interface,
            tick_period_ms: self.config.tick_period_ms,
            hw,
        };
        self.scheduler.tick(&mut runner);
    }

    /// One received serial byte.  Returns what the parser made of it.
    pub fn handle_byte(&mut self, byte: u8, hw: &mut (impl ActuatorPort + LinePort)) -> Step {
        let step = self.parser.feed(byte);
        match &step {
            Step::Query(code) => run_query(*code, &self.state, hw),
            Step::Assign(code, raw) => run_assignment(*code, raw, &mut self.state, hw),
            Step::Pending | Step::Ignored | Step::Discarded(_) => {}
        }
        step
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    pub fn interface(&self) -> &LocalInterface {
        &self.interface
    }

    pub fn parser(&self) -> &ProtocolParser {
        &self.parser
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Ticks handled since construction.
    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }

    fn refresh_duties(&mut self, hw: &impl ActuatorPort) {
        self.state.readings.heater_duty = hw.heater_duty();
        self.state.readings.cooler_duty = hw.cooler_duty();
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate
// ───────────────────────────────────────────────────────────────

/// Borrowed view of the service that runs one scheduler slot.
struct TaskRunner<'a, H> {
    state: &'a mut ControlState,
    interface: &'a mut LocalInterface,
    tick_period_ms: u32,
    hw: &'a mut H,
}

impl<H: Hardware> TaskDelegate for TaskRunner<'_, H> {
    fn run_task(&mut self, task: Task) {
        let hw = &mut *self.hw;
        let state = &mut *self.state;

        match task {
            Task::Tachometer => {
                state.readings.tachometer_rpm = hw.read_tachometer_rpm();
            }
            Task::Control => {
                let sample = hw.read_temperature();
                if sample.is_finite() {
                    let filtered = state.filter.update(sample);
                    state.readings.temperature = filtered;
                    if state.pid.is_on() {
                        let percent = state.pid.update(filtered);
                        hw.set_heater_duty(percent / 100.0);
                    }
                } else {
                    // Keeps the filter history and the last heater command.
                    warn!("Control: bad temperature sample {sample}, skipped");
                }
                state.readings.heater_duty = hw.heater_duty();
                state.readings.cooler_duty = hw.cooler_duty();
            }
            Task::LocalInterface => self.interface.tick(state, hw),
            Task::DeadlineTimer => {
                state
                    .deadline
                    .tick(self.tick_period_ms, &mut state.pid, hw);
            }
        }
    }
}
