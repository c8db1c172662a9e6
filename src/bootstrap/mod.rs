//! Startup: CLI, configuration, tracing and dependency wiring.

pub mod cli;
pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;
