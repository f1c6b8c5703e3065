//! Store and service construction

use crate::state::AppState;
use statements_core::Config;
use statements_storage::{ContentStore, MemoryStore};
use statements_tokens::TokenStore;
use std::sync::Arc;

/// Build the content store, the token store and the state that shares them.
pub fn initialize_state(config: &Config) -> Arc<AppState> {
    let shard_count = config.store_shard_count();

    let content: Arc<dyn ContentStore> = Arc::new(MemoryStore::with_shards(shard_count));
    let tokens = Arc::new(TokenStore::with_shards(shard_count));

    tracing::info!(
        storage = content.backend_type(),
        shard_count,
        token_ttl_secs = config.token_ttl().as_secs(),
        "Statement stores initialized"
    );

    Arc::new(AppState::new(config.clone(), content, tokens))
}
