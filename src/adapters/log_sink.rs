//! Log-based line sink adapter.
//!
//! Implements [`LinePort`] by writing every terminal reply to the `log`
//! facade at `debug`.  The simulator mirrors its stdout replies through
//! it, so a debug log holds the full command/reply transcript next to
//! the control messages.

use log::debug;

use crate::app::ports::LinePort;

/// Adapter that logs every reply line.
#[derive(Debug, Default)]
pub struct LogLineSink {
    emitted: usize,
}

impl LogLineSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl LinePort for LogLineSink {
    fn emit_line(&mut self, text: &str) {
        self.emitted += 1;
        debug!("TERM | {text}");
    }
}
