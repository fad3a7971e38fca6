//! Sensornet
//!
//! Layered configuration engine for networked IoT sensor applications:
//! file base, environment-variable overrides, runtime mutations, role
//! default profiles, schema validation, and persistence.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
