//! Command implementations

pub mod stage;
