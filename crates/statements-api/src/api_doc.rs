//! OpenAPI documentation.
//! The public download path in handler annotations is the default one; it is rewritten
//! at runtime when the service is configured with a different path.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use statements_core::config::DEFAULT_PUBLIC_DOWNLOAD_PATH;
use statements_core::models;

/// Moves path keys under the default public download path to `download_path`.
fn transform_download_paths(spec: &mut utoipa::openapi::OpenApi, download_path: &str) {
    if download_path == DEFAULT_PUBLIC_DOWNLOAD_PATH {
        return;
    }
    let path_map = std::mem::take(&mut spec.paths.paths);
    for (key, item) in path_map {
        let new_key = match key.strip_prefix(DEFAULT_PUBLIC_DOWNLOAD_PATH) {
            Some(rest) => format!("{}{}", download_path, rest),
            None => key,
        };
        spec.paths.paths.insert(new_key, item);
    }
}

/// Returns the OpenAPI spec with the public download path set to `download_path`.
pub fn get_openapi_spec(download_path: &str) -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    transform_download_paths(&mut spec, download_path);
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Statements API",
        version = "0.1.0",
        description = "Monthly PDF account statements: upload, list per customer, and share through time-limited public download links."
    ),
    paths(
        // Statements
        handlers::statement_upload::upload_statement,
        handlers::statement_list::list_statements,
        handlers::download_link::create_download_link,
        // Public
        handlers::public_download::download_statement,
        // Health
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::UploadResponse,
            models::StatementMetadata,
            models::DownloadLinkResponse,
            models::Page<models::StatementMetadata>,
            error::ErrorResponse,
            handlers::health::HealthCheckResponse,
        )
    ),
    tags(
        (name = "statements", description = "Statement upload, listing and download link issuance"),
        (name = "public", description = "Token-authorized statement downloads"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
