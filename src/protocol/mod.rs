//! Serial command protocol.
//!
//! - [`parser`] turns received bytes into complete commands.
//! - [`dispatch`] applies them to the control state and writes the reply.
//! - [`format`] renders and parses the fixed-width numeric fields.

pub mod dispatch;
pub mod format;
pub mod parser;

pub use parser::{ProtocolParser, Step};
