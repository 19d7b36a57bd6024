//! Resume data: schema, the embedded fallback document, and the ordered loader.

pub mod backup;
pub mod loader;
pub mod model;
pub mod text;
