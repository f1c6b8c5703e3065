//! Statements API library
//!
//! HTTP surface of the statement vault: multipart upload, per-customer listing,
//! download link issuance and token-authorized public downloads.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;

pub use state::AppState;
