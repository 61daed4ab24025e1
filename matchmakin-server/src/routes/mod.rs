//! HTTP route handlers

pub mod mode;
pub mod roster;
pub mod status;
