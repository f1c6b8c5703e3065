use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::ApiPath;
use crate::state::AppState;
use axum::{extract::State, Json};
use statements_core::models::DownloadLinkResponse;
use statements_storage::StatementPeriod;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/statements/{customer_id}/{year}/{month}/download-link",
    tag = "statements",
    params(
        ("customer_id" = u64, Path, description = "Customer ID", example = 12345),
        ("year" = i32, Path, description = "Statement year", example = 2024),
        ("month" = u32, Path, description = "Statement month (1-12)", example = 1)
    ),
    responses(
        (status = 200, description = "Download link created", body = DownloadLinkResponse),
        (status = 400, description = "Malformed path segment or invalid period", body = ErrorResponse),
        (status = 404, description = "Statement not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "create_download_link"))]
pub async fn create_download_link(
    State(state): State<Arc<AppState>>,
    ApiPath((customer_id, year, month)): ApiPath<(u64, i32, u32)>,
) -> Result<Json<DownloadLinkResponse>, HttpAppError> {
    let period = StatementPeriod::new(year, month)?;
    let link = state.statements.create_download_link(customer_id, period)?;
    Ok(Json(link))
}
