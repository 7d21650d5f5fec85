//! `simplebank` Core Library
//!
//! Shared functionality for `simplebank` components:
//! - Configuration resolution (defaults, JSON file, environment)
//! - Tracing subscriber setup
//! - Common error types

pub mod config;
pub mod error;
pub mod tracing_init;

pub use config::{Config, LogConfig, TokenConfig};
pub use error::{Error, Result};
