//! Byte-at-a-time command grammar.
//!
//! Wire format (ASCII, no length prefix):
//! ```text
//!   #g<code>;            query
//!   #s<code><value>;     assignment, value = up to 7 × [0-9,]
//! ```
//!
//! The parser is fed one byte per receive interrupt and never blocks.
//! `#` is a hot reset: it forces `Ready` from any state, so a terminal
//! can always resynchronise by starting a new command.  Any byte that
//! does not fit the current state drops the command and returns to
//! `Idle`; each such drop is reported as a named [`Discard`] so callers
//! (and tests) can tell the paths apart even though nothing is printed.

use log::debug;

/// Frame sentinel.
pub const SENTINEL: u8 = b'#';
/// Command terminator.
pub const TERMINATOR: u8 = b';';
/// Maximum characters kept from an assignment value.
pub const MAX_VALUE_LEN: usize = 7;

/// Accumulated assignment value, `[0-9,]` only.
pub type ValueBuf = heapless::String<MAX_VALUE_LEN>;

// ---------------------------------------------------------------------------
// Parameter codes
// ---------------------------------------------------------------------------

/// Parameters readable with `#g<code>;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetCode {
    /// `t`: filtered temperature.
    Temperature,
    /// `c`: cooler duty.
    CoolerDuty,
    /// `a`: heater duty.
    HeaterDuty,
    /// `p`
    Kp,
    /// `i`
    Ki,
    /// `d`
    Kd,
    /// `s`: controller on/off.
    ControlStatus,
    /// `g`: temperature setpoint.
    Setpoint,
    /// `r`: cooler RPM.
    CoolerRpm,
    /// `m`: deadline timer status and time left.
    TimerStatus,
}

impl GetCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b't' => Self::Temperature,
            b'c' => Self::CoolerDuty,
            b'a' => Self::HeaterDuty,
            b'p' => Self::Kp,
            b'i' => Self::Ki,
            b'd' => Self::Kd,
            b's' => Self::ControlStatus,
            b'g' => Self::Setpoint,
            b'r' => Self::CoolerRpm,
            b'm' => Self::TimerStatus,
            _ => return None,
        })
    }
}

/// Parameters writable with `#s<code><value>;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetCode {
    /// `t`: temperature setpoint.
    Setpoint,
    /// `i`
    Ki,
    /// `c`: cooler duty.
    CoolerDuty,
    /// `a`: heater duty (capped).
    HeaterDuty,
    /// `p`
    Kp,
    /// `d`
    Kd,
    /// `s`: controller on (1) / off.
    ControlSwitch,
    /// `b`: action the deadline timer will take: on (1) / off.
    TimerAction,
    /// `n`: deadline timer duration in seconds.
    TimerDuration,
    /// `m`: start (1) / abort the deadline timer.
    TimerSwitch,
    /// `k`: unlock the local buttons (one-way).
    LocalUnlock,
}

impl SetCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b't' => Self::Setpoint,
            b'i' => Self::Ki,
            b'c' => Self::CoolerDuty,
            b'a' => Self::HeaterDuty,
            b'p' => Self::Kp,
            b'd' => Self::Kd,
            b's' => Self::ControlSwitch,
            b'b' => Self::TimerAction,
            b'n' => Self::TimerDuration,
            b'm' => Self::TimerSwitch,
            b'k' => Self::LocalUnlock,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Parser outcome
// ---------------------------------------------------------------------------

/// Why a partially received command was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// Byte after `#` was neither `g` nor `s`.
    UnknownSelector(u8),
    /// Byte after `#g` is not a readable parameter.
    UnknownQueryCode(u8),
    /// Byte after `#s` is not a writable parameter.
    UnknownAssignCode(u8),
    /// Query code was not followed by `;`.
    MissingTerminator(u8),
    /// Assignment value contained a byte outside `[0-9,;]`.
    InvalidValueByte(u8),
}

/// Result of feeding one byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Byte arrived outside a command and was ignored.
    Ignored,
    /// Byte accepted; command still incomplete.
    Pending,
    /// A complete query.
    Query(GetCode),
    /// A complete assignment with its raw value text.
    Assign(SetCode, ValueBuf),
    /// The command in progress was dropped.
    Discarded(Discard),
}

/// Externally visible parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Idle,
    Ready,
    Get,
    Set,
    Param,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Ready,
    Get,
    Set,
    Param(GetCode),
    Value(SetCode),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Streaming command parser.
pub struct ProtocolParser {
    phase: Phase,
    value: ValueBuf,
}

impl Default for ProtocolParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolParser {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            value: ValueBuf::new(),
        }
    }

    /// Feed one received byte.
    pub fn feed(&mut self, byte: u8) -> Step {
        if byte == SENTINEL {
            self.phase = Phase::Ready;
            return Step::Pending;
        }

        let (next, step) = match self.phase {
            Phase::Idle => (Phase::Idle, Step::Ignored),

            Phase::Ready => match byte {
                b'g' => (Phase::Get, Step::Pending),
                b's' => (Phase::Set, Step::Pending),
                other => (Phase::Idle, Step::Discarded(Discard::UnknownSelector(other))),
            },

            Phase::Get => match GetCode::from_byte(byte) {
                Some(code) => (Phase::Param(code), Step::Pending),
                None => (Phase::Idle, Step::Discarded(Discard::UnknownQueryCode(byte))),
            },

            Phase::Set => match SetCode::from_byte(byte) {
                Some(code) => {
                    self.value.clear();
                    (Phase::Value(code), Step::Pending)
                }
                None => (Phase::Idle, Step::Discarded(Discard::UnknownAssignCode(byte))),
            },

            Phase::Param(code) => {
                if byte == TERMINATOR {
                    (Phase::Idle, Step::Query(code))
                } else {
                    (Phase::Idle, Step::Discarded(Discard::MissingTerminator(byte)))
                }
            }

            Phase::Value(code) => match byte {
                b'0'..=b'9' | b',' => {
                    // Excess characters are dropped; the command still completes.
                    let _ = self.value.push(char::from(byte));
                    (Phase::Value(code), Step::Pending)
                }
                TERMINATOR => (Phase::Idle, Step::Assign(code, self.value.clone())),
                other => (Phase::Idle, Step::Discarded(Discard::InvalidValueByte(other))),
            },
        };

        if let Step::Discarded(reason) = step {
            debug!("Protocol: dropped command ({reason:?})");
        }
        self.phase = next;
        step
    }

    pub fn state(&self) -> ParserState {
        match self.phase {
            Phase::Idle => ParserState::Idle,
            Phase::Ready => ParserState::Ready,
            Phase::Get => ParserState::Get,
            Phase::Set => ParserState::Set,
            Phase::Param(_) => ParserState::Param,
            Phase::Value(_) => ParserState::Value,
        }
    }

    /// Value characters collected so far.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Drop any partial command.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.value.clear();
    }
}
