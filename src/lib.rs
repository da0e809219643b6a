//! Test client simulator configuration
//!
//! Loads the simulator's JSON configuration file and exposes read-only,
//! keyed access to its values.
//!
//! ## Path resolution
//!
//! A fixed set of entries ([`PathField`]) name files and directories
//! relative to the tests directory. They are joined onto it once, at load
//! time:
//!
//! ```text
//! {"LogFile": "out.log"}  +  /tests  →  {"LogFile": "/tests/out.log"}
//! ```
//!
//! ## Logging
//!
//! The loader reports through an injected [`LogSink`]. Looking up a key the
//! file does not define emits an error record before the error is returned.
//!
//! ## Example
//!
//! ```no_run
//! use clientsim_config::{ConfigLoader, TracingSink};
//!
//! let config = ConfigLoader::load("tests/conf.json", "tests", TracingSink::shared())?;
//! let log_file = config.get("LogFile")?;
//! # Ok::<(), clientsim_config::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;

// Re-export main types
pub use config::{ConfigLoader, PathField};
pub use error::{AppError, ConfigError, Result};
pub use logging::{LogRecord, LogSink, MemorySink, SharedLogSink, TracingSink};
