//! Content store abstraction
//!
//! This module defines the ContentStore trait that statement storage backends implement.

use bytes::Bytes;

use crate::keys::StatementPath;

/// Content store trait
///
/// Holds raw document bytes addressed by [`StatementPath`]. Implementations must be safe
/// to share between request tasks: a `get` racing a `put` on the same path returns either
/// the old or the new document, never a partial one.
///
/// None of the operations fail for a valid path; a missing document is `None`, an
/// unmatched prefix is an empty listing.
pub trait ContentStore: Send + Sync {
    /// Store a document, replacing any existing one at the same path (last write wins).
    fn put(&self, path: &StatementPath, data: Bytes);

    /// Fetch the document stored at `path`.
    fn get(&self, path: &StatementPath) -> Option<Bytes>;

    /// Check if a document exists at `path`.
    fn exists(&self, path: &StatementPath) -> bool;

    /// Every stored path whose key starts with `prefix`. Order is unspecified.
    fn list(&self, prefix: &str) -> Vec<StatementPath>;

    /// Short name of the backend, reported by the health endpoint.
    fn backend_type(&self) -> &'static str;

    /// Number of stored documents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
