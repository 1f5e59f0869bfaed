//! Core type definitions for stagecopy

mod error;
mod outcome;

pub use error::StageError;
pub use outcome::Outcome;
