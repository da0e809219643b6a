//! Configuration module
//!
//! Loads the simulator's JSON configuration and resolves its path entries.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, LOG_TARGET, expand_tilde};
pub use types::PathField;
