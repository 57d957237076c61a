//! Tempctrl host simulator: main entry point
//!
//! Runs the controller core against a simulated heater/cooler plant.
//! stdin plays the serial receiver (every byte is one receive
//! interrupt), a fixed-rate loop plays the tick timer, and replies are
//! printed on stdout.
//!
//! ```text
//!  stdin ──▶ uart-rx thread ──▶ SharedService::on_byte ─┐
//!                                                       ├─▶ AppService ─▶ SimulatedPlant
//!  tick loop (100 ms) ────────▶ SharedService::on_tick ─┘
//! ```
//!
//! Usage: `tempctrl-sim [config.json]`, log level from `TEMPCTRL_LOG`.

use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};

use tempctrl::adapters::logging;
use tempctrl::adapters::sim::{PlantModel, SimulatedPlant};
use tempctrl::app::service::AppService;
use tempctrl::app::shared::SharedService;
use tempctrl::config::ControllerConfig;

/// Ticks between status log lines.
const STATUS_EVERY_TICKS: u64 = 100;

fn load_config() -> Result<ControllerConfig> {
    let Some(path) = std::env::args().nth(1) else {
        info!("No config file given, using defaults");
        return Ok(ControllerConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: ControllerConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!("Loaded config from {path}");
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    logging::init().context("installing log backend")?;
    info!("Tempctrl simulator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    config.validate().context("invalid configuration")?;

    // ── 3. Core + plant ───────────────────────────────────────
    let plant = SimulatedPlant::new(&config, PlantModel::default());
    let shared = Arc::new(SharedService::new(AppService::new(config.clone()), plant));

    // ── 4. Serial receiver ────────────────────────────────────
    let rx = Arc::clone(&shared);
    std::thread::Builder::new()
        .name("uart-rx".into())
        .spawn(move || {
            for byte in std::io::stdin().lock().bytes() {
                match byte {
                    Ok(b) => {
                        rx.on_byte(b);
                    }
                    Err(e) => {
                        warn!("stdin read failed: {e}");
                        break;
                    }
                }
            }
            info!("stdin closed, serial receiver stopped");
        })
        .context("spawning serial receiver")?;

    // ── 5. Tick loop ──────────────────────────────────────────
    let period = Duration::from_millis(u64::from(config.tick_period_ms));
    let mut next = Instant::now();
    loop {
        next += period;
        // The plant evolves between ticks; the controller only samples it.
        shared.with(|_, plant| plant.advance());
        shared.on_tick();

        shared.with(|svc, plant| {
            if svc.ticks() % STATUS_EVERY_TICKS == 0 {
                let s = svc.state();
                info!(
                    "STATUS | T={:.2}C (plant {:.2}C) SP={:.1}C | PID {} | heater={:.2} cooler={:.2} | rpm={} | replies={}",
                    s.readings.temperature,
                    plant.temperature(),
                    s.pid.setpoint(),
                    if s.pid.is_on() { "on" } else { "off" },
                    s.readings.heater_duty,
                    s.readings.cooler_duty,
                    s.readings.tachometer_rpm,
                    plant.replies_sent(),
                );
            }
        });

        if let Some(wait) = next.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }
}
