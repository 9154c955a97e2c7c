//! texatlas Common Utilities
//!
//! Shared infrastructure for all texatlas crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Configuration loading (import settings, descriptor key mapping)

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
