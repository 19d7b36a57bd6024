//! The reveal component and the boundary between rich inline content and flat strings.

pub mod component;
pub mod content;
