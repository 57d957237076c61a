//! Application core: pure domain logic, zero I/O.
//!
//! Temperature filtering, PID control, the deadline timer, the serial
//! protocol and the front panel all meet here.  Every interaction with
//! hardware goes through the **port traits** in [`ports`], so the whole
//! core runs on the host against mocks.

pub mod ports;
pub mod service;
pub mod shared;
pub mod state;
