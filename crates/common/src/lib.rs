//! Shared configuration for the freelook harness.
//!
//! # Invariants
//! - Configuration is built once at process start and never mutated afterwards.
//! - Every consumer receives it by reference; there is no global state.

pub mod config;

pub use config::{Config, ConfigError};

pub fn crate_info() -> &'static str {
    "freelook-common v0.1.0"
}
