//! # authhub-core
//!
//! Core crate for Authhub. Contains configuration schemas, the unified
//! error system, and log redaction helpers.
//!
//! This crate has **no** internal dependencies on other Authhub crates.

pub mod config;
pub mod error;
pub mod redact;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
