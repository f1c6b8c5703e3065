//! Statements UI: a static page that uploads, lists, and links statements through the API.

use axum::{http::header, response::IntoResponse};

const PAGE: &str = include_str!("../../static/statements.html");
const SCRIPT: &str = include_str!("../../static/statements.js");

pub async fn statements_page() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], PAGE)
}

pub async fn statements_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT,
    )
}
