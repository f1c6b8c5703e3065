//! Statement upload filenames.
//!
//! Uploads carry no form fields besides the file; the customer and period come from the
//! filename, `statement_<customerId>_<yyyy>_<m or mm>` followed by anything that does
//! not start with a digit (normally `.pdf`).

use std::sync::LazyLock;

use regex::Regex;
use statements_core::AppError;
use statements_storage::StatementPeriod;

static FILENAME_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^statement_(\d+)_(\d{4})_(\d{1,2})(?:\D.*)?$"));

const EXPECTED_FORMAT: &str = "Expected: statement_<customerId>_<year>_<month>.pdf";

/// Extract the customer id and billing period from an upload filename.
pub fn parse_statement_filename(filename: &str) -> Result<(u64, StatementPeriod), AppError> {
    let pattern = FILENAME_PATTERN.as_ref().map_err(|e| {
        AppError::Internal(format!("Failed to compile statement filename regex: {}", e))
    })?;

    let captures = pattern.captures(filename).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Invalid filename format '{}'. {}",
            filename, EXPECTED_FORMAT
        ))
    })?;

    let customer_id = captures[1].parse::<u64>().map_err(|_| {
        AppError::InvalidInput(format!("Customer id '{}' is out of range", &captures[1]))
    })?;
    // Both are at most four digits, so they always fit.
    let year = captures[2].parse::<i32>().unwrap_or_default();
    let month = captures[3].parse::<u32>().unwrap_or_default();

    let period = StatementPeriod::new(year, month)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok((customer_id, period))
}
