//! ThermoLight firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod portal;
pub mod telemetry;

// Hardware-facing modules; the espidf implementations are guarded by cfg
// attributes inside, with in-memory simulation on every other target.
pub mod adapters;
pub mod drivers;
pub mod sensors;
