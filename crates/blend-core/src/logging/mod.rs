//! Logging utilities.
//!
//! Logger initialization lives here so binaries and tests configure the
//! `log` facade the same way. Library code only ever talks to `log`.

mod init;

pub use init::{init_logging, LoggingConfig};
