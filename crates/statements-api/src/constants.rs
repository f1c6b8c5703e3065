//! API constants

/// Prefix of the statement management routes
pub const STATEMENTS_PREFIX: &str = "/api/statements";

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Path of the API docs viewer
pub const DOCS_PATH: &str = "/docs";

/// Path of the statements UI page
pub const UI_PATH: &str = "/statements";

/// The docs viewer loads its web component from here.
pub const DOCS_SCRIPT_ORIGIN: &str = "https://unpkg.com";

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Filename offered to browsers for every downloaded statement
pub const DOWNLOAD_FILENAME: &str = "statement.pdf";
