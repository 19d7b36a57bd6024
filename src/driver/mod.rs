//! Time sources, the virtual event loop, and the per-instance reveal state machine.

pub mod clock;
pub mod frame;
pub mod scheduler;
