use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;

use crate::keys::StatementPath;
use crate::traits::ContentStore;

pub const DEFAULT_SHARD_COUNT: usize = 16;

type Shard = RwLock<HashMap<String, Bytes>>;

/// In-memory content store
///
/// Documents are spread over several independently locked shards (keys are hashed to
/// pick one) so concurrent uploads and downloads for different customers rarely contend.
pub struct MemoryStore {
    shards: Vec<Shard>,
}

impl MemoryStore {
    /// Create a new store with the default shard count (16 shards)
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    /// Create a store with a custom shard count (clamped to at least 1)
    pub fn with_shards(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect();
        Self { shards }
    }

    fn shard(&self, key: &str) -> &Shard {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % self.shards.len()]
    }

    // A panic while holding a guard cannot leave a map half-updated, so poisoned locks
    // are taken over rather than propagated.
    fn read(shard: &Shard) -> RwLockReadGuard<'_, HashMap<String, Bytes>> {
        shard.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(shard: &Shard) -> RwLockWriteGuard<'_, HashMap<String, Bytes>> {
        shard.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemoryStore {
    fn put(&self, path: &StatementPath, data: Bytes) {
        let key = path.to_key();
        let size_bytes = data.len();
        let replaced = Self::write(self.shard(&key))
            .insert(key.clone(), data)
            .is_some();

        tracing::debug!(key = %key, size_bytes, replaced, "Stored statement document");
    }

    fn get(&self, path: &StatementPath) -> Option<Bytes> {
        let key = path.to_key();
        Self::read(self.shard(&key)).get(&key).cloned()
    }

    fn exists(&self, path: &StatementPath) -> bool {
        let key = path.to_key();
        Self::read(self.shard(&key)).contains_key(&key)
    }

    fn list(&self, prefix: &str) -> Vec<StatementPath> {
        let mut paths = Vec::new();
        for shard in &self.shards {
            let documents = Self::read(shard);
            paths.extend(
                documents
                    .keys()
                    .filter(|key| key.starts_with(prefix))
                    .filter_map(|key| key.parse::<StatementPath>().ok()),
            );
        }
        paths
    }

    fn backend_type(&self) -> &'static str {
        "memory"
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|shard| Self::read(shard).len()).sum()
    }
}
