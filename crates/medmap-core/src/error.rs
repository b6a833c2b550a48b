//! # Error Types
//!
//! Domain-specific error types for medmap-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medmap-core errors (this file)                                        │
//! │  ├── CoreError        - Store operation failures                       │
//! │  └── ValidationError  - Draft / input validation failures              │
//! │                                                                         │
//! │  console errors (in app)                                               │
//! │  └── ApiError         - What the operator sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error leaves the store untouched: a failed mutation is never
//! partially applied.

use thiserror::Error;

use crate::types::RecordKind;

// =============================================================================
// Core Error
// =============================================================================

/// Store operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record with this id exists in the collection.
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: RecordKind, id: String },

    /// The record's current status does not allow the requested change.
    ///
    /// ## When This Occurs
    /// - Toggling a bed that is cleaning or blocked
    /// - Dispatching an ambulance that is off duty
    /// - Moving a completed surgery back to scheduled
    #[error("{kind} {id} cannot move from {from} to {to}")]
    TransitionNotAllowed {
        kind: RecordKind,
        id: String,
        from: String,
        to: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input (a draft, a filter, a tag)
/// doesn't meet requirements. They are raised before anything is mutated.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric count, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
