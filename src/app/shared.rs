//! Interrupt-safe wrapper around the service and its board.
//!
//! The tick timer and the serial receiver are independent interrupt
//! sources that both mutate the control state.  [`SharedService`] puts
//! the service *and* the hardware behind one
//! `critical_section::Mutex<RefCell<…>>`; each entry point runs to
//! completion inside a single critical section, so the two handlers
//! can never interleave.
//!
//! On the board the HAL provides the critical-section implementation
//! (interrupt masking).  The host build enables `critical-section/std`.

use core::cell::RefCell;

use critical_section::Mutex;

use super::ports::Hardware;
use super::service::AppService;
use crate::protocol::parser::Step;

struct Inner<H> {
    service: AppService,
    hw: H,
}

pub struct SharedService<H> {
    inner: Mutex<RefCell<Inner<H>>>,
}

impl<H: Hardware> SharedService<H> {
    /// Start `service` on `hw` and wrap both.
    pub fn new(mut service: AppService, mut hw: H) -> Self {
        service.start(&mut hw);
        Self {
            inner: Mutex::new(RefCell::new(Inner { service, hw })),
        }
    }

    /// Tick interrupt handler.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let Inner { service, hw } = &mut *inner;
            service.tick(hw);
        });
    }

    /// Byte-received interrupt handler.
    pub fn on_byte(&self, byte: u8) -> Step {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let Inner { service, hw } = &mut *inner;
            service.handle_byte(byte, hw)
        })
    }

    /// Run `f` against the service and board under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut AppService, &mut H) -> R) -> R {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let Inner { service, hw } = &mut *inner;
            f(service, hw)
        })
    }

    /// Unwrap into the service and board.
    pub fn into_parts(self) -> (AppService, H) {
        let Inner { service, hw } = self.inner.into_inner().into_inner();
        (service, hw)
    }
}
