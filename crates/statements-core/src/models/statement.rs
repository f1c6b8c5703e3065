use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of a customer's statement listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatementMetadata {
    pub customer_id: u64,
    /// Billing period as `YYYY-MM`.
    #[schema(example = "2024-10")]
    pub period: String,
    /// Storage path, `statements/{customer_id}/{YYYY-MM}.pdf`.
    #[schema(example = "statements/123/2024-10.pdf")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DownloadLinkResponse {
    /// Relative URL of the public download endpoint, token included.
    #[schema(example = "/api/public/download/3f2b8c9d0e1f4a5b8c7d6e5f4a3b2c1d")]
    pub url: String,
    pub expires_in_seconds: u64,
    pub expires_at: DateTime<Utc>,
}
