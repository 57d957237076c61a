//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements                      | Connects to           |
//! |----------------|---------------------------------|-----------------------|
//! | `sim`          | SensorPort, ActuatorPort,       | Thermal model + the   |
//! |                | LinePort, LocalUiPort           | real drivers on fakes |
//! | `log_sink`     | LinePort                        | `log` facade          |
//! | `logging`      | `log` backend (host only)       | stderr                |

pub mod log_sink;
#[cfg(feature = "host")]
pub mod logging;
pub mod sim;
