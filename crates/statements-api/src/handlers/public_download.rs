//! Public statement download: serves a statement by download token (no auth).

use crate::constants::{DOWNLOAD_FILENAME, PDF_CONTENT_TYPE};
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::ApiPath;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use statements_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/public/download/{token}",
    tag = "public",
    params(
        ("token" = String, Path, description = "Download token from a download link")
    ),
    responses(
        (status = 200, description = "Statement PDF", content_type = "application/pdf"),
        (status = 400, description = "Invalid or expired link", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, token), fields(operation = "public_download"))]
pub async fn download_statement(
    State(state): State<Arc<AppState>>,
    ApiPath(token): ApiPath<String>,
) -> Result<Response, HttpAppError> {
    let data = state.statements.download_via_token(token.trim())?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PDF_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", DOWNLOAD_FILENAME),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
