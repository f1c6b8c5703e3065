pub mod download_link;
pub mod health;
pub mod public_download;
pub mod statement_list;
pub mod statement_upload;
pub mod ui;
