//! Statement Vault Core Library
//!
//! This crate provides the configuration, error taxonomy and API models shared by the
//! statement vault crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StatementsConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
