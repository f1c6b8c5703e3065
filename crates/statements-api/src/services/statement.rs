//! Statement orchestration: derives storage paths, persists and reads documents, mints
//! and redeems download tokens, and shapes listings into pages.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use statements_core::models::{
    DownloadLinkResponse, Page, StatementMetadata, UploadResponse, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use statements_core::AppError;
use statements_storage::{ContentStore, StatementPath, StatementPeriod};
use statements_tokens::{TokenError, TokenStore};

/// Listing order by billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a `sort` query value of the form `period[,asc|desc]`.
    pub fn parse_sort(sort: &str) -> Result<Self, AppError> {
        let mut parts = sort.split(',').map(str::trim);
        let field = parts.next().unwrap_or_default();
        if !field.eq_ignore_ascii_case("period") {
            return Err(AppError::InvalidInput(format!(
                "Unsupported sort field '{}': only 'period' is sortable",
                field
            )));
        }

        let direction = match parts.next() {
            None | Some("") => SortDirection::Desc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) => {
                return Err(AppError::InvalidInput(format!(
                    "Unsupported sort direction '{}': expected 'asc' or 'desc'",
                    d
                )))
            }
        };

        if parts.next().is_some() {
            return Err(AppError::InvalidInput(format!(
                "Invalid sort '{}': expected 'period,asc' or 'period,desc'",
                sort
            )));
        }

        Ok(direction)
    }
}

/// Pagination and ordering of a statement listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page: usize,
    pub size: usize,
    pub direction: SortDirection,
}

impl ListParams {
    /// Page size is clamped to 1..=MAX_PAGE_SIZE.
    pub fn new(page: usize, size: usize, direction: SortDirection) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            direction,
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, SortDirection::Desc)
    }
}

#[derive(Clone)]
pub struct StatementService {
    content: Arc<dyn ContentStore>,
    tokens: Arc<TokenStore>,
    token_ttl: Duration,
    download_path: String,
}

impl StatementService {
    /// `download_path` is the prefix of generated links, without a trailing slash.
    pub fn new(
        content: Arc<dyn ContentStore>,
        tokens: Arc<TokenStore>,
        token_ttl: Duration,
        download_path: impl Into<String>,
    ) -> Self {
        Self {
            content,
            tokens,
            token_ttl,
            download_path: download_path.into(),
        }
    }

    /// Store a statement, replacing any earlier upload for the same customer and period.
    pub fn save_statement(
        &self,
        customer_id: u64,
        period: StatementPeriod,
        data: Bytes,
    ) -> UploadResponse {
        let path = StatementPath::new(customer_id, period);
        tracing::info!(
            customer_id,
            period = %period,
            path = %path,
            size_bytes = data.len(),
            "Saving statement"
        );
        self.content.put(&path, data);

        UploadResponse {
            message: "Statement uploaded".to_string(),
            path: path.to_string(),
        }
    }

    /// Issue a time-limited link to an existing statement.
    pub fn create_download_link(
        &self,
        customer_id: u64,
        period: StatementPeriod,
    ) -> Result<DownloadLinkResponse, AppError> {
        let path = StatementPath::new(customer_id, period);
        if !self.content.exists(&path) {
            return Err(AppError::NotFound(format!(
                "No statement for customer {} and period {}",
                customer_id, period
            )));
        }

        let issued = self.tokens.issue(path, self.token_ttl).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to issue download token");
            AppError::from(anyhow::Error::new(e).context("Failed to issue download token"))
        })?;

        tracing::info!(
            customer_id,
            period = %period,
            expires_at = %issued.expires_at,
            "Created download link"
        );

        Ok(DownloadLinkResponse {
            url: format!("{}/{}", self.download_path, issued.token),
            expires_in_seconds: self.token_ttl.as_secs(),
            expires_at: issued.expires_at,
        })
    }

    /// Redeem a download token for the statement bytes.
    ///
    /// An unknown or expired token and a token whose statement is gone all fail with
    /// `LinkInvalidOrExpired`, so callers learn nothing about which case applied.
    pub fn download_via_token(&self, token: &str) -> Result<Bytes, AppError> {
        let path = self.tokens.resolve(token).map_err(|e| match e {
            TokenError::NotFoundOrExpired => AppError::LinkInvalidOrExpired,
            TokenError::InvalidTtl(msg) => AppError::Internal(msg),
        })?;

        match self.content.get(&path) {
            Some(data) => {
                tracing::info!(path = %path, size_bytes = data.len(), "Serving statement via token");
                Ok(data)
            }
            None => {
                tracing::warn!(path = %path, "Valid token points at a missing statement");
                Err(AppError::LinkInvalidOrExpired)
            }
        }
    }

    /// One page of a customer's statements, ordered by period.
    pub fn list_statements(&self, customer_id: u64, params: ListParams) -> Page<StatementMetadata> {
        let mut paths = self
            .content
            .list(&StatementPath::customer_prefix(customer_id));

        match params.direction {
            SortDirection::Asc => paths.sort_by_key(|path| path.period()),
            SortDirection::Desc => paths.sort_by_key(|path| std::cmp::Reverse(path.period())),
        }

        tracing::debug!(
            customer_id,
            total = paths.len(),
            page = params.page,
            size = params.size,
            direction = ?params.direction,
            "Listing statements"
        );

        Page::slice(paths, params.page, params.size).map(|path| StatementMetadata {
            customer_id: path.customer_id(),
            period: path.period().to_string(),
            path: path.to_string(),
        })
    }
}
