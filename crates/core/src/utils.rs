//! Small shared helpers.

use chrono::NaiveDate;

use crate::errors::{Error, Result};

/// Parses the store's `YYYY-MM-DD` calendar date format.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("invalid date '{}'", text.trim())))
}

/// `None` for blank optional text fields.
pub fn none_if_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
