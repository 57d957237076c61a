//! Front-panel push buttons.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups: a pressed button reads
//! low.  The Decrease/Increase pins are shared with the serial port on
//! the reference board, so a slot may be empty; an empty slot (or a pin
//! that fails to read) reports [`ButtonState::Unavailable`].
//!
//! Buttons are sampled, not edge-triggered.  The interface task runs at
//! 2 Hz, which is slow enough that contact bounce never shows up.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::app::ports::{Button, ButtonState};

pub struct ButtonBank<P> {
    decrease: Option<P>,
    increase: Option<P>,
    advance: Option<P>,
}

impl<P: InputPin> ButtonBank<P> {
    pub fn new(decrease: Option<P>, increase: Option<P>, advance: Option<P>) -> Self {
        Self {
            decrease,
            increase,
            advance,
        }
    }

    /// Install (or replace) the pin behind `button`.
    pub fn attach(&mut self, button: Button, pin: P) -> Option<P> {
        self.slot(button).replace(pin)
    }

    /// Remove the pin behind `button`, e.g. to hand it to another peripheral.
    pub fn detach(&mut self, button: Button) -> Option<P> {
        self.slot(button).take()
    }

    pub fn read(&mut self, button: Button) -> ButtonState {
        let Some(pin) = self.slot(button) else {
            return ButtonState::Unavailable;
        };
        match pin.is_low() {
            Ok(true) => ButtonState::Pressed,
            Ok(false) => ButtonState::Released,
            Err(e) => {
                warn!("Button {button:?}: read failed ({:?})", e.kind());
                ButtonState::Unavailable
            }
        }
    }

    fn slot(&mut self, button: Button) -> &mut Option<P> {
        match button {
            Button::Decrease => &mut self.decrease,
            Button::Increase => &mut self.increase,
            Button::Advance => &mut self.advance,
        }
    }
}
