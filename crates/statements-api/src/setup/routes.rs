//! Route configuration and setup.

use crate::constants::{
    DOCS_PATH, DOCS_SCRIPT_ORIGIN, OPENAPI_JSON_PATH, STATEMENTS_PREFIX, UI_PATH,
};
use crate::handlers::{
    download_link, health, public_download, statement_list, statement_upload, ui,
};
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use statements_core::Config;
use statements_infra::{
    get_request_id, request_id_middleware, security_headers_middleware, SecurityHeadersConfig,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(
        vec![DOCS_SCRIPT_ORIGIN.to_string()],
        config.is_production(),
    ));

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = get_request_id(request).unwrap_or_default();
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri().path(),
            request_id = %request_id,
        )
    });

    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let openapi = crate::api_doc::get_openapi_spec(config.public_download_path());

    let app = api_routes()
        .merge(public_routes(config))
        .with_state(state)
        .route(
            OPENAPI_JSON_PATH,
            get(move || async move { Json(openapi) }),
        )
        .route(UI_PATH, get(ui::statements_page))
        .route(&format!("{}/app.js", UI_PATH), get(ui::statements_script))
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_JSON_PATH).path(DOCS_PATH))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        // Statement size is not capped.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ));

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let cors = if config.cors_origins().iter().any(|origin| origin == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/upload", STATEMENTS_PREFIX),
            post(statement_upload::upload_statement),
        )
        .route(
            &format!(
                "{}/{{customer_id}}/{{year}}/{{month}}/download-link",
                STATEMENTS_PREFIX
            ),
            get(download_link::create_download_link),
        )
        .route(
            &format!("{}/{{customer_id}}", STATEMENTS_PREFIX),
            get(statement_list::list_statements),
        )
}

fn public_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/{{token}}", config.public_download_path()),
            get(public_download::download_statement),
        )
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
}
