//! # Gate Runtime Library
//!
//! Exposes the runtime modules for testing. The entry point is the
//! `gmn-gate` binary in `main.rs`.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line
//! 2. Load configuration from the environment, overlay CLI flags, validate
//! 3. Initialize logging and register metrics
//! 4. Build the container and spawn the session watchers
//! 5. Run one command

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod container;

pub use cli::{Cli, Command};
pub use container::{AppConfig, ConfigError, GateContainer};
