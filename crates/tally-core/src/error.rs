//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  ├── StoreError       - What a repository reports                      │
//! │  └── CoreError        - Use-case taxonomy (what callers match on)      │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - sqlx failures, converted into StoreError       │
//! │                                                                         │
//! │  tally-api errors (in app)                                             │
//! │  └── ApiError         - JSON body + HTTP status                        │
//! │                                                                         │
//! │  Flow: DbError → StoreError → CoreError → ApiError → Client            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, name, field)
//! 3. Repositories do not interpret failures; use cases classify them

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Use-case errors.
///
/// ## Taxonomy
/// | Variant       | Meaning                                   | HTTP |
/// |---------------|-------------------------------------------|------|
/// | `Validation`  | Malformed or out-of-range input           | 400  |
/// | `NotFound`    | Referenced good or transaction is absent  | 404  |
/// | `Conflict`    | Duplicate good name                       | 409  |
/// | `Persistence` | Storage failure (incl. commit/rollback)   | 500  |
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A unique business key is already taken.
    ///
    /// ## When This Occurs
    /// - Creating a good whose name already exists
    /// - Renaming a good to the name of another good
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Storage layer failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl CoreError {
    /// Creates a NotFound error for a good.
    pub fn good_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Good",
            id: id.into(),
        }
    }

    /// Creates a NotFound error for a transaction.
    pub fn transaction_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Transaction",
            id: id.into(),
        }
    }

    /// Creates a Conflict error for a duplicate good name.
    pub fn duplicate_good_name(name: impl Into<String>) -> Self {
        CoreError::Conflict {
            entity: "Good",
            field: "name",
            value: name.into(),
        }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors reported by repository implementations.
///
/// Repositories surface raw storage outcomes here; deciding what a
/// `UniqueViolation` or a zero-row update *means* is the use case's job.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A statement that targets one row matched none.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: String },

    /// Storage is unreachable (pool closed, exhausted, connect failure).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Any other failure, including commit and rollback errors.
    #[error("{0}")]
    Failed(String),
}

/// Result type returned by repository traits.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before any repository call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// A collection that needs at least one element is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },

    /// Arithmetic on the input overflowed.
    #[error("{field} is too large")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
