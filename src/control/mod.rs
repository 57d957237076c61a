//! Control loop building blocks: DEMA filter, PID controller and the
//! deadline timer that switches the controller unattended.

pub mod deadline;
pub mod filter;
pub mod pid;
