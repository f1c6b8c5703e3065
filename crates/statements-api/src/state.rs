//! Application state shared by all handlers.

use statements_core::Config;
use statements_storage::ContentStore;
use statements_tokens::TokenStore;
use std::sync::Arc;

use crate::services::StatementService;

/// Stores are built once at start-up and shared through `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub content: Arc<dyn ContentStore>,
    pub tokens: Arc<TokenStore>,
    pub statements: StatementService,
}

impl AppState {
    pub fn new(config: Config, content: Arc<dyn ContentStore>, tokens: Arc<TokenStore>) -> Self {
        let statements = StatementService::new(
            content.clone(),
            tokens.clone(),
            config.token_ttl(),
            config.public_download_path(),
        );

        Self {
            config,
            content,
            tokens,
            statements,
        }
    }
}
