//! Data models for the HTTP API

mod pagination;
mod statement;

pub use pagination::*;
pub use statement::*;
