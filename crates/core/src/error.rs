//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// uniqueness, stock invariants). HTTP status mapping belongs to the boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    /// A value failed validation (e.g. negative price, empty name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A create/update would violate SKU uniqueness.
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),

    /// An adjustment would drive stock below zero.
    #[error("stock cannot go negative (current {current}, delta {delta})")]
    NegativeStock { current: i64, delta: i64 },

    /// A requested product was not found.
    #[error("product not found")]
    NotFound,
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn duplicate_sku(sku: impl Into<String>) -> Self {
        Self::DuplicateSku(sku.into())
    }

    pub fn negative_stock(current: i64, delta: i64) -> Self {
        Self::NegativeStock { current, delta }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
