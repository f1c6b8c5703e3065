//! Statement Storage Library
//!
//! This crate provides the content store for statement documents: the ContentStore
//! trait, an in-memory sharded implementation, and the storage key codec.
//!
//! # Storage key format
//!
//! Every document lives under `statements/{customer_id}/{YYYY-MM}.pdf`. The key is the
//! only place the (customer id, period) pair is recorded, so it must parse back
//! losslessly. Key generation and parsing are centralized in the `keys` module; callers
//! never build key strings by hand.

pub mod keys;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use keys::{PathError, StatementPath, StatementPeriod};
pub use memory::MemoryStore;
pub use traits::ContentStore;
