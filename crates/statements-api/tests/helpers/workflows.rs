//! Reusable request sequences for integration tests.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use bytes::Bytes;
use serde_json::Value;

use super::fixtures::{statement_filename, statement_pdf};

/// Upload `data` under `filename` as the `file` field.
pub async fn upload_file(client: &TestServer, filename: &str, data: Vec<u8>) -> TestResponse {
    let part = Part::bytes(Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type("application/pdf");
    let form = MultipartForm::new().add_part("file", part);

    client.post("/api/statements/upload").multipart(form).await
}

/// Upload a fixture statement for (customer, year, month) and assert it was accepted.
pub async fn upload_statement(client: &TestServer, customer_id: u64, year: i32, month: u32) {
    let response = upload_file(
        client,
        &statement_filename(customer_id, year, month),
        statement_pdf(&format!("{}-{}-{}", customer_id, year, month)),
    )
    .await;
    assert_eq!(response.status_code(), 200, "upload failed: {}", response.text());
}

/// Request a download link and return the JSON body.
pub async fn request_download_link(
    client: &TestServer,
    customer_id: u64,
    year: i32,
    month: u32,
) -> Value {
    let response = client
        .get(&format!(
            "/api/statements/{}/{}/{}/download-link",
            customer_id, year, month
        ))
        .await;
    assert_eq!(
        response.status_code(),
        200,
        "download link failed: {}",
        response.text()
    );
    response.json::<Value>()
}

/// The token is the last path segment of a download link.
pub fn token_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or_default().to_string()
}
