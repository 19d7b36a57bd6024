//! The animated profile page: layout of every reveal plus the event loop that drives them.

pub mod layout;
pub mod profile;
