use thiserror::Error;

/// Token store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is unusable now. Deliberately covers both "never issued" and "expired".
    #[error("Download link is invalid or has expired")]
    NotFoundOrExpired,

    /// Caller contract violation: TTLs must be positive and representable as a timestamp offset.
    #[error("Invalid token TTL: {0}")]
    InvalidTtl(String),
}

pub type TokenResult<T> = Result<T, TokenError>;
