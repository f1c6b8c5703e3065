//! Time-limited download token store.
//!
//! Maps opaque tokens to a [`StatementPath`] until the token's expiry. Per token the
//! lifecycle is `issued -> valid (any number of resolves) -> expired -> purged`, where
//! purging happens either in the first `resolve` that sees the expiry or in `sweep`.

use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use statements_storage::StatementPath;

use crate::error::{TokenError, TokenResult};
use crate::token::DownloadToken;

pub const DEFAULT_SHARD_COUNT: usize = 16;

#[derive(Debug, Clone, Copy)]
struct TokenRecord {
    path: StatementPath,
    expires_at: DateTime<Utc>,
}

impl TokenRecord {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of a successful `issue`.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: DownloadToken,
    pub expires_at: DateTime<Utc>,
}

type Shard = Mutex<HashMap<String, TokenRecord>>;

/// Sharded in-memory token store
///
/// Every operation on a token (including the sweep) takes that token's shard lock for
/// the whole read-modify-write, so a resolve can never return a path for a record that
/// a concurrent sweep has already removed.
pub struct TokenStore {
    shards: Vec<Shard>,
}

impl TokenStore {
    /// Create a new token store with the default shard count (16 shards)
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    /// Create a token store with a custom shard count (clamped to at least 1)
    pub fn with_shards(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self { shards }
    }

    fn shard(&self, token: &str) -> &Shard {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % self.shards.len()]
    }

    fn lock(shard: &Shard) -> MutexGuard<'_, HashMap<String, TokenRecord>> {
        shard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a fresh token for `path`, valid for `ttl`.
    pub fn issue(&self, path: StatementPath, ttl: Duration) -> TokenResult<IssuedToken> {
        if ttl.is_zero() {
            return Err(TokenError::InvalidTtl("TTL must be positive".to_string()));
        }
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| TokenError::InvalidTtl(e.to_string()))?;
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::InvalidTtl("expiry is out of range".to_string()))?;

        let record = TokenRecord { path, expires_at };

        // A collision in 122 random bits is not expected, but a live token is never reused.
        let token = loop {
            let token = DownloadToken::generate();
            let mut records = Self::lock(self.shard(token.as_str()));
            if let Entry::Vacant(entry) = records.entry(token.as_str().to_string()) {
                entry.insert(record);
                break token;
            }
        };

        tracing::info!(path = %path, expires_at = %expires_at, "Issued download token");
        tracing::debug!(token = %token, "Download token value");

        Ok(IssuedToken { token, expires_at })
    }

    /// Resolve a token to its statement path.
    ///
    /// A token that was never issued and one that has expired fail identically. An
    /// expired record is removed before returning. Valid tokens stay in place, so the
    /// same link keeps working until it expires.
    pub fn resolve(&self, token: &str) -> TokenResult<StatementPath> {
        let now = Utc::now();
        let mut records = Self::lock(self.shard(token));

        let Some(record) = records.get(token).copied() else {
            tracing::debug!(token = %token, "Download token not found");
            return Err(TokenError::NotFoundOrExpired);
        };

        if record.is_expired(now) {
            records.remove(token);
            tracing::debug!(
                token = %token,
                expired_at = %record.expires_at,
                "Download token expired, evicted"
            );
            return Err(TokenError::NotFoundOrExpired);
        }

        tracing::debug!(token = %token, path = %record.path, "Download token validated");
        Ok(record.path)
    }

    /// Remove every expired record. Returns how many were purged.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut purged = 0;

        for shard in &self.shards {
            let mut records = Self::lock(shard);
            let before = records.len();
            records.retain(|_, record| !record.is_expired(now));
            purged += before - records.len();
        }

        if purged > 0 {
            tracing::info!(purged, "Purged expired download tokens");
        }
        purged
    }

    /// Move a token's expiry into the past without removing it; the next `resolve` or
    /// `sweep` reclaims it. Returns false when the token is unknown.
    pub fn force_expire(&self, token: &str) -> bool {
        let mut records = Self::lock(self.shard(token));
        match records.get_mut(token) {
            Some(record) => {
                record.expires_at = Utc::now() - chrono::Duration::seconds(1);
                tracing::info!(path = %record.path, "Forced expiry of download token");
                true
            }
            None => false,
        }
    }

    /// Whether a record (live or expired but not yet purged) exists for `token`.
    pub fn contains(&self, token: &str) -> bool {
        Self::lock(self.shard(token)).contains_key(token)
    }

    /// Number of records held, including expired ones awaiting a sweep.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| Self::lock(shard).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statements_storage::StatementPeriod;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    const MINUTE: Duration = Duration::from_secs(60);

    fn path(customer_id: u64, year: i32, month: u32) -> StatementPath {
        StatementPath::new(customer_id, StatementPeriod::new(year, month).unwrap())
    }

    #[test]
    fn test_issue_then_resolve_returns_path() {
        let store = TokenStore::new();
        let issued = store.issue(path(123, 2024, 10), MINUTE).unwrap();

        assert!(issued.expires_at > Utc::now());
        assert_eq!(
            store.resolve(issued.token.as_str()),
            Ok(path(123, 2024, 10))
        );
    }

    #[test]
    fn test_repeated_resolves_within_ttl_succeed() {
        let store = TokenStore::new();
        let issued = store.issue(path(1, 2024, 1), MINUTE).unwrap();

        for _ in 0..5 {
            assert_eq!(store.resolve(issued.token.as_str()), Ok(path(1, 2024, 1)));
        }
        assert!(store.contains(issued.token.as_str()));
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let store = TokenStore::new();
        let result = store.issue(path(1, 2024, 1), Duration::ZERO);
        assert!(matches!(result, Err(TokenError::InvalidTtl(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unrepresentable_ttl_is_rejected() {
        let store = TokenStore::new();
        let result = store.issue(path(1, 2024, 1), Duration::from_secs(u64::MAX));
        assert!(matches!(result, Err(TokenError::InvalidTtl(_))));
    }

    #[test]
    fn test_unknown_and_expired_tokens_fail_identically() {
        let store = TokenStore::new();
        let issued = store.issue(path(1, 2024, 1), MINUTE).unwrap();
        store.force_expire(issued.token.as_str());

        let expired = store.resolve(issued.token.as_str());
        let unknown = store.resolve("0123456789abcdef0123456789abcdef");

        assert_eq!(expired, Err(TokenError::NotFoundOrExpired));
        assert_eq!(expired, unknown);
    }

    #[test]
    fn test_resolve_evicts_expired_record() {
        let store = TokenStore::new();
        let issued = store.issue(path(1, 2024, 1), MINUTE).unwrap();
        assert!(store.force_expire(issued.token.as_str()));
        assert!(store.contains(issued.token.as_str()));

        assert!(store.resolve(issued.token.as_str()).is_err());
        assert!(!store.contains(issued.token.as_str()));
    }

    #[test]
    fn test_force_expire_unknown_token() {
        let store = TokenStore::new();
        assert!(!store.force_expire("missing"));
    }

    #[test]
    fn test_sweep_removes_only_expired_tokens() {
        let store = TokenStore::new();
        let expired_a = store.issue(path(1, 2024, 1), MINUTE).unwrap();
        let expired_b = store.issue(path(2, 2024, 1), MINUTE).unwrap();
        let live = store.issue(path(3, 2024, 1), MINUTE).unwrap();

        store.force_expire(expired_a.token.as_str());
        assert_eq!(store.sweep(), 1);
        assert_eq!(store.len(), 2);

        store.force_expire(expired_b.token.as_str());
        assert_eq!(store.sweep(), 1);
        assert_eq!(store.len(), 1);

        assert_eq!(store.sweep(), 0);
        assert_eq!(store.resolve(live.token.as_str()), Ok(path(3, 2024, 1)));
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let store = TokenStore::new();
        let issued = store
            .issue(path(123, 2024, 10), Duration::from_millis(50))
            .unwrap();
        assert!(store.resolve(issued.token.as_str()).is_ok());

        thread::sleep(Duration::from_millis(100));

        assert_eq!(
            store.resolve(issued.token.as_str()),
            Err(TokenError::NotFoundOrExpired)
        );
        assert!(!store.contains(issued.token.as_str()));
    }

    #[test]
    fn test_sweep_reclaims_naturally_expired_token() {
        let store = TokenStore::new();
        let issued = store
            .issue(path(123, 2024, 10), Duration::from_millis(50))
            .unwrap();
        let live = store.issue(path(123, 2024, 11), MINUTE).unwrap();

        thread::sleep(Duration::from_millis(100));

        assert_eq!(store.sweep(), 1);
        assert!(!store.contains(issued.token.as_str()));
        assert!(store.contains(live.token.as_str()));
    }

    #[test]
    fn test_concurrent_issue_yields_unique_tokens() {
        let store = Arc::new(TokenStore::new());
        let handles: Vec<_> = (0..8u64)
            .map(|customer_id| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..250)
                        .map(|_| {
                            store
                                .issue(path(customer_id, 2024, 1), MINUTE)
                                .unwrap()
                                .token
                                .into_inner()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for token in handle.join().unwrap() {
                assert!(seen.insert(token), "duplicate token issued");
            }
        }
        assert_eq!(seen.len(), 8 * 250);
        assert_eq!(store.len(), 8 * 250);
    }

    #[test]
    fn test_resolve_and_sweep_race_is_deterministic() {
        let store = Arc::new(TokenStore::new());
        let tokens: Vec<_> = (0..200u64)
            .map(|i| {
                let issued = store.issue(path(i, 2024, 1), MINUTE).unwrap();
                store.force_expire(issued.token.as_str());
                issued.token
            })
            .collect();

        let sweeper = {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    store.sweep();
                }
            })
        };

        for token in &tokens {
            assert_eq!(
                store.resolve(token.as_str()),
                Err(TokenError::NotFoundOrExpired)
            );
        }
        sweeper.join().unwrap();

        assert!(store.is_empty());
    }
}
