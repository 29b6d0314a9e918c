//! `env_logger` setup for the binary. Libraries log through the `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
