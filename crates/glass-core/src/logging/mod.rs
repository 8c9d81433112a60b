//! Logging utilities.
//!
//! All diagnostics go through the `log` facade. This module only wires up an
//! `env_logger` backend for binaries and tests that want one.

mod init;

pub use init::{LoggingConfig, init_logging};
