//! Download Token Library
//!
//! Issues short-lived opaque tokens that map to a statement's storage path, validates
//! them on use, and purges expired ones in the background.
//!
//! Tokens are multi-use within their TTL. An unknown token and an expired token are
//! reported with the same error so callers cannot tell them apart.

pub mod error;
pub mod store;
pub mod sweeper;
pub mod token;

pub use error::{TokenError, TokenResult};
pub use store::{IssuedToken, TokenStore};
pub use sweeper::{SweeperHandle, TokenSweeper};
pub use token::DownloadToken;
