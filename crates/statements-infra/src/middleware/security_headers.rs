use axum::http::HeaderValue;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Security headers configuration
#[derive(Clone, Debug)]
pub struct SecurityHeadersConfig {
    /// Extra origins allowed to serve scripts (the docs viewer loads from a CDN).
    pub script_origins: Vec<String>,
    pub is_production: bool,
}

impl SecurityHeadersConfig {
    pub fn new(script_origins: Vec<String>, is_production: bool) -> Self {
        Self {
            script_origins,
            is_production,
        }
    }

    /// Build Content-Security-Policy header value
    fn build_csp(&self) -> String {
        let script_src = if self.script_origins.is_empty() {
            "script-src 'self'".to_string()
        } else {
            format!("script-src 'self' {}", self.script_origins.join(" "))
        };

        [
            "default-src 'self'".to_string(),
            script_src,
            "style-src 'self' 'unsafe-inline'".to_string(),
            "img-src 'self' data: https:".to_string(),
            "font-src 'self' data: https:".to_string(),
            "connect-src 'self'".to_string(),
            "frame-ancestors 'none'".to_string(),
        ]
        .join("; ")
    }
}

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(config): State<Arc<SecurityHeadersConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));

    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if config.is_production {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    if let Ok(csp) = HeaderValue::from_str(&config.build_csp()) {
        headers.insert("Content-Security-Policy", csp);
    }

    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(config: SecurityHeadersConfig) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                Arc::new(config),
                security_headers_middleware,
            ))
    }

    async fn headers_for(config: SecurityHeadersConfig) -> axum::http::HeaderMap {
        app(config)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .headers()
            .clone()
    }

    #[test]
    fn test_csp_includes_script_origins() {
        let config = SecurityHeadersConfig::new(vec!["https://unpkg.com".to_string()], false);
        assert!(config
            .build_csp()
            .contains("script-src 'self' https://unpkg.com"));
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let headers = headers_for(SecurityHeadersConfig::new(vec![], false)).await;

        assert_eq!(headers["X-Content-Type-Options"], "nosniff");
        assert_eq!(headers["X-Frame-Options"], "DENY");
        assert!(headers["Content-Security-Policy"]
            .to_str()
            .unwrap()
            .contains("script-src 'self'"));
        assert!(headers.get("Strict-Transport-Security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_only_in_production() {
        let headers = headers_for(SecurityHeadersConfig::new(vec![], true)).await;
        assert!(headers.get("Strict-Transport-Security").is_some());
    }
}
