//! Statement storage keys.
//!
//! Key format: `statements/{customer_id}/{YYYY-MM}.pdf`. Every backend and every
//! caller goes through [`StatementPath`] so keys stay consistent and can always be
//! parsed back into the (customer id, period) pair they were built from.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const ROOT: &str = "statements";
const EXTENSION: &str = ".pdf";

/// Path codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Invalid month {0}: expected 1-12")]
    InvalidMonth(u32),

    #[error("Invalid year {0}: expected 1-9999")]
    InvalidYear(i32),

    #[error("Invalid period '{0}': expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Billing period of a statement (calendar year and month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatementPeriod {
    year: i32,
    month: u32,
}

impl StatementPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, PathError> {
        if !(1..=9999).contains(&year) {
            return Err(PathError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PathError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for StatementPeriod {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PathError::InvalidPeriod(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Canonical address of one statement document.
///
/// Ordering is by customer, then period, which matches the order of the rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatementPath {
    customer_id: u64,
    period: StatementPeriod,
}

impl StatementPath {
    pub fn new(customer_id: u64, period: StatementPeriod) -> Self {
        Self {
            customer_id,
            period,
        }
    }

    pub fn customer_id(&self) -> u64 {
        self.customer_id
    }

    pub fn period(&self) -> StatementPeriod {
        self.period
    }

    /// Listing prefix covering every statement of one customer: `statements/{customer_id}/`.
    pub fn customer_prefix(customer_id: u64) -> String {
        format!("{}/{}/", ROOT, customer_id)
    }

    /// Render the storage key.
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}{}",
            ROOT, self.customer_id, self.period, EXTENSION
        )
    }
}

impl FromStr for StatementPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PathError::InvalidKey(s.to_string());

        let mut parts = s.split('/');
        let (Some(root), Some(customer), Some(file), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if root != ROOT {
            return Err(invalid());
        }
        // u64::from_str accepts a leading '+', which would break the round trip
        if customer.is_empty() || !customer.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let customer_id: u64 = customer.parse().map_err(|_| invalid())?;
        if customer_id.to_string() != customer {
            return Err(invalid());
        }

        let period = file.strip_suffix(EXTENSION).ok_or_else(invalid)?;
        let period = period.parse()?;

        Ok(Self::new(customer_id, period))
    }
}
