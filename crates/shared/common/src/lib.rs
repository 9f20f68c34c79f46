//! Common utilities shared across the gym crates.
//!
//! This crate provides:
//! - Unified error handling with user-facing messages
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{format_validation_errors, AppError, AppResult, OptionExt};
