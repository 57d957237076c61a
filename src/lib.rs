//! Tempctrl controller library.
//!
//! Heater/cooler temperature control core: DEMA-filtered sensing, a PID
//! on the heater, a one-shot deadline timer, a byte-oriented terminal
//! protocol and a 16×2 LCD front panel.  Everything hardware-specific
//! sits behind the port traits in [`app::ports`]; the host simulator in
//! [`adapters::sim`] implements them over a thermal model.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod protocol;
pub mod scheduler;
pub mod ui;

pub use error::{Error, RangeError, Result};
