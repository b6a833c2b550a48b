//! # Validation Module
//!
//! Input validation utilities for MedMap drafts, filters and commands.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (clap)                                               │
//! │  ├── Argument presence and shape                                       │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, numeric text, dates                              │
//! │  └── Capacity rules (available ≤ total)                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  ├── Record existence                                                  │
//! │  └── Status transition tables                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use medmap_core::validation::{parse_count, validate_required};
//!
//! let ward = validate_required("ward", "  ICU ").unwrap();
//! assert_eq!(ward, "ICU");
//!
//! assert_eq!(parse_count("available", "24").unwrap(), 24);
//! assert!(parse_count("available", "-3").is_err());
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search query.
pub const MAX_QUERY_LEN: usize = 100;

/// Longest accepted free-text field on a draft.
pub const MAX_TEXT_LEN: usize = 200;

/// Date format used by record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used by schedules and admissions.
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_TEXT_LEN` characters
///
/// ## Returns
/// The trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    validate_length(field, value)?;
    Ok(value.to_string())
}

/// Validates an optional text field: blank becomes `None`.
pub fn validate_optional(field: &str, value: &str) -> ValidationResult<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    validate_length(field, value)?;
    Ok(Some(value.to_string()))
}

fn validate_length(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a record id given by the operator.
pub fn validate_record_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    Ok(id.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a non-negative whole count typed into a form field.
///
/// ## Example
/// ```rust
/// use medmap_core::validation::parse_count;
///
/// assert_eq!(parse_count("threshold", " 15 ").unwrap(), 15);
/// assert!(parse_count("threshold", "").is_err());     // required
/// assert!(parse_count("threshold", "1.5").is_err());  // not whole
/// assert!(parse_count("threshold", "-2").is_err());   // negative
/// ```
pub fn parse_count(field: &str, text: &str) -> ValidationResult<u32> {
    let text = validate_required(field, text)?;

    let out_of_range = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: u32::MAX as i64,
    };

    match text.parse::<i64>() {
        Ok(n) => u32::try_from(n).map_err(|_| out_of_range()),
        Err(_) => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        }),
    }
}

/// Validates that a count does not exceed its total.
///
/// ## Rules
/// - `available <= total`
pub fn validate_capacity(available: u32, total: u32) -> ValidationResult<()> {
    if available > total {
        return Err(ValidationError::OutOfRange {
            field: "available".to_string(),
            min: 0,
            max: total as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, text: &str) -> ValidationResult<NaiveDate> {
    let text = validate_required(field, text)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

/// Parses a `YYYY-MM-DD HH:MM` timestamp. The `T` separator of a
/// datetime-local input is accepted too.
pub fn parse_timestamp(field: &str, text: &str) -> ValidationResult<NaiveDateTime> {
    let text = validate_required(field, text)?.replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&text, MINUTE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD HH:MM".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", " ICU-09 ").unwrap(), "ICU-09");
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", "   ").is_err());
        assert!(validate_required("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_optional() {
        assert_eq!(validate_optional("notes", "  ").unwrap(), None);
        assert_eq!(
            validate_optional("notes", " stable ").unwrap(),
            Some("stable".to_string())
        );
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  amb-00 ").unwrap(), "amb-00");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("available", "0").unwrap(), 0);
        assert_eq!(parse_count("available", "24").unwrap(), 24);

        assert!(matches!(
            parse_count("available", "").unwrap_err(),
            ValidationError::Required { .. }
        ));
        assert!(matches!(
            parse_count("available", "-1").unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
        assert!(matches!(
            parse_count("available", "ten").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(8, 15).is_ok());
        assert!(validate_capacity(15, 15).is_ok());
        assert!(validate_capacity(16, 15).is_err());
    }

    #[test]
    fn test_parse_dates() {
        assert!(parse_date("date", "2024-01-15").is_ok());
        assert!(parse_date("date", "15/01/2024").is_err());
        assert!(parse_timestamp("scheduledTime", "2024-01-15 09:00").is_ok());
        assert_eq!(
            parse_timestamp("scheduledTime", "2024-01-15T09:00").unwrap(),
            parse_timestamp("scheduledTime", "2024-01-15 09:00").unwrap()
        );
        assert!(parse_timestamp("scheduledTime", "2024-01-15").is_err());
    }

    #[test]
    fn test_validate_record_id() {
        assert_eq!(validate_record_id(" S001 ").unwrap(), "S001");
        assert!(validate_record_id("").is_err());
    }
}
