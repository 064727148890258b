//! # Zyarat Common Library
//!
//! Shared code for the Zyarat services including:
//! - Error and result types
//! - TOML bootstrap configuration loading
//! - Logging initialization (console + size-rotated log file)

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
