//! Public download integration tests.
//!
//! Run with: `cargo test -p statements-api --test public_download_test`

mod helpers;

use helpers::fixtures::statement_pdf;
use helpers::setup_test_app;
use helpers::workflows::{request_download_link, token_from_url, upload_statement};
use serde_json::Value;

#[tokio::test]
async fn test_download_sets_pdf_headers() {
    let app = setup_test_app();
    let client = app.client();
    upload_statement(client, 123, 2024, 10).await;
    let link = request_download_link(client, 123, 2024, 10).await;

    let response = client.get(link["url"].as_str().unwrap()).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "application/pdf");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=statement.pdf"
    );
    assert_eq!(response.header("cache-control"), "no-store");
    assert_eq!(
        response.as_bytes().as_ref(),
        statement_pdf("123-2024-10").as_slice()
    );
}

#[tokio::test]
async fn test_link_can_be_used_repeatedly_within_ttl() {
    let app = setup_test_app();
    let client = app.client();
    upload_statement(client, 1, 2024, 1).await;
    let link = request_download_link(client, 1, 2024, 1).await;
    let url = link["url"].as_str().unwrap();

    for _ in 0..3 {
        assert_eq!(client.get(url).await.status_code(), 200);
    }
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let app = setup_test_app();
    let client = app.client();

    let response = client
        .get("/api/public/download/0123456789abcdef0123456789abcdef")
        .await;

    assert_eq!(response.status_code(), 400);
    let json = response.json::<Value>();
    assert_eq!(json["code"], "LINK_INVALID_OR_EXPIRED");
    assert_eq!(json["error"], "Download link is invalid or has expired");
}

#[tokio::test]
async fn test_expired_token_is_rejected_like_unknown_one() {
    let app = setup_test_app();
    let client = app.client();
    upload_statement(client, 2, 2024, 6).await;
    let link = request_download_link(client, 2, 2024, 6).await;
    let url = link["url"].as_str().unwrap();
    let token = token_from_url(url);

    assert!(app.state.tokens.force_expire(&token));
    let expired = client.get(url).await;
    let unknown = client.get("/api/public/download/not-a-token").await;

    assert_eq!(expired.status_code(), 400);
    assert_eq!(expired.json::<Value>()["code"], unknown.json::<Value>()["code"]);
    assert!(!app.state.tokens.contains(&token));
}

#[tokio::test]
async fn test_sweep_invalidates_expired_links() {
    let app = setup_test_app();
    let client = app.client();
    upload_statement(client, 3, 2024, 7).await;
    let expired = request_download_link(client, 3, 2024, 7).await;
    let live = request_download_link(client, 3, 2024, 7).await;
    let expired_url = expired["url"].as_str().unwrap();

    app.state.tokens.force_expire(&token_from_url(expired_url));
    assert_eq!(app.state.tokens.sweep(), 1);

    assert_eq!(client.get(expired_url).await.status_code(), 400);
    assert_eq!(
        client.get(live["url"].as_str().unwrap()).await.status_code(),
        200
    );
}

#[tokio::test]
async fn test_custom_download_path() {
    let app = helpers::setup_test_app_with(&[("PUBLIC_DOWNLOAD_PATH", "/files/")]);
    let client = app.client();
    upload_statement(client, 4, 2024, 4).await;

    let link = request_download_link(client, 4, 2024, 4).await;
    let url = link["url"].as_str().unwrap();

    assert!(url.starts_with("/files/"));
    assert_eq!(client.get(url).await.status_code(), 200);
    assert_eq!(
        client
            .get(&format!("/api/public/download/{}", token_from_url(url)))
            .await
            .status_code(),
        404
    );
}
