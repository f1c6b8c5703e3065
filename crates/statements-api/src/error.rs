//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. `AppError`, `PathError` and
//! extractor rejections convert into `HttpAppError`, which renders the JSON
//! `ErrorResponse` body and logs at the level the error asks for.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use statements_core::{AppError, ErrorMetadata, LogLevel};
use statements_storage::PathError;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: IntoResponse and AppError both live in other crates)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<PathError> for HttpAppError {
    fn from(err: PathError) -> Self {
        HttpAppError(AppError::InvalidInput(err.to_string()))
    }
}

impl From<PathRejection> for HttpAppError {
    fn from(rejection: PathRejection) -> Self {
        HttpAppError(rejection_to_app_error(
            rejection.status(),
            rejection.body_text(),
        ))
    }
}

impl From<QueryRejection> for HttpAppError {
    fn from(rejection: QueryRejection) -> Self {
        HttpAppError(rejection_to_app_error(
            rejection.status(),
            rejection.body_text(),
        ))
    }
}

/// Extractor rejections are caller mistakes unless axum itself reports a server error
/// (e.g. a handler asking for path params the route does not have).
fn rejection_to_app_error(status: StatusCode, message: String) -> AppError {
    if status.is_server_error() {
        AppError::Internal(message)
    } else {
        AppError::BadRequest(message)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details only outside production, and never for sensitive errors.
        let show_details = !is_production_env() && !app_error.is_sensitive();

        let body = ErrorResponse {
            error: app_error.client_message(),
            details: show_details.then(|| app_error.detailed_message()),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejection_is_bad_request() {
        let err = rejection_to_app_error(
            StatusCode::BAD_REQUEST,
            "Cannot parse `abc` to a `u64`".to_string(),
        );
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("abc")));

        let response = HttpAppError(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_side_rejection_is_internal() {
        let err = rejection_to_app_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "No paths parameters found for matched route".to_string(),
        );
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_from_path_error_is_invalid_input() {
        let HttpAppError(app_err) = PathError::InvalidMonth(13).into();
        match app_err {
            AppError::InvalidInput(msg) => assert!(msg.contains("13")),
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_link_error_response_status() {
        let response = HttpAppError(AppError::LinkInvalidOrExpired).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Download link is invalid or has expired".to_string(),
            details: None,
            error_type: None,
            code: "LINK_INVALID_OR_EXPIRED".to_string(),
            recoverable: false,
            suggested_action: Some("Request a new download link".to_string()),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["code"], "LINK_INVALID_OR_EXPIRED");
        assert_eq!(json["recoverable"], false);
        assert!(json.get("details").is_none());
        assert!(json.get("error_type").is_none());
    }
}
