//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (service URLs, timeouts, polling)
//! - Client settings
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Cli, ClientConfig, Command, Credentials, DecodeArgs, LogFormat, LogLevel, SearchArgs,
};
