//! Support library for the `netmetrics` binary.
//!
//! Exposes the orchestrator, configuration loader and logging setup so tests
//! can drive a full run without spawning a subprocess.

pub mod cli;
pub mod config;
pub mod logging;
