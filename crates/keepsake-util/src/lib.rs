//! Shared utilities for keepsake.
//!
//! This crate provides common utilities used across the keepsake workspace:
//! - Logging setup with tracing
//! - Path utilities for resolving snapshot locations

pub mod log;
pub mod path;

pub use log::{LogConfig, LogLevel};
