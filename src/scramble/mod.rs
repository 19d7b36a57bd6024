//! Per-character reveal timelines and the glyph pools they scramble with.

pub mod plan;
pub mod pool;
