//! Page-level timing: the phase sequencer, staggered start delays and delayed-mount blocks.

pub mod phase;
pub mod staged;
pub mod stagger;
