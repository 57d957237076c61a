//! Peripheral drivers built on `embedded-hal` traits.

pub mod button;
pub mod pwm;
pub mod tachometer;
