use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::filename::parse_statement_filename;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{Multipart, State},
    Json,
};
use statements_core::models::UploadResponse;
use statements_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/statements/upload",
    tag = "statements",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "One field named `file`, a PDF named `statement_<customerId>_<year>_<month>.pdf`"
    ),
    responses(
        (status = 200, description = "Statement uploaded", body = UploadResponse),
        (status = 400, description = "Empty file or invalid filename", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_statement"))]
pub async fn upload_statement(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let file = extract_multipart_file(multipart).await?;

    if file.data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()).into());
    }

    let filename = file
        .filename
        .as_deref()
        .ok_or_else(|| AppError::InvalidInput("Uploaded file has no filename".to_string()))?;
    let (customer_id, period) = parse_statement_filename(filename)?;

    let response = state
        .statements
        .save_statement(customer_id, period, file.data);

    Ok(Json(response))
}
