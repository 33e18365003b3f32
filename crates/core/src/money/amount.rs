//! Boundary parsing for user-entered amounts.
//!
//! Every amount that flows into a balance or budget goes through here, so the
//! derived sums only ever see integers.

use crate::errors::{Error, Result, ValidationError};

/// Parses an integer amount typed by the user.
///
/// Surrounding whitespace, a leading `¥` and `,`/`_` digit separators are
/// accepted. An empty field means `0`.
pub fn parse_amount(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('¥').unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return Ok(0);
    }

    Ok(cleaned.parse::<i64>()?)
}

/// Like [`parse_amount`], but negative values are rejected.
pub fn parse_non_negative_amount(input: &str) -> Result<i64> {
    let value = parse_amount(input)?;
    if value < 0 {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "amount must not be negative: {}",
            input.trim()
        ))));
    }
    Ok(value)
}
