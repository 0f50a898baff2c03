//! # Error Types
//!
//! Domain-specific error types for ibstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ibstock-core errors (this file)                                        │
//! │  ├── PosError         - Cart / checkout rule violations                 │
//! │  └── ValidationError  - Malformed catalog or input data                 │
//! │                                                                         │
//! │  pos-terminal errors (app)                                              │
//! │  └── ApiError         - What the front end sees (serialized)            │
//! │                                                                         │
//! │  PosError never leaves the session: it becomes an Error notice.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each `PosError` message is the text of the notice shown to the cashier

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// POS Error
// =============================================================================

/// Point-of-sale rule violations.
///
/// None of these are fatal. The session converts each one into an Error
/// notice (except `NotFound`, which is silent) and leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PosError {
    /// Adding or raising a quantity would exceed the line's stock snapshot.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Arroz Pérola 1kg × 25 (snapshot 25)
    ///      │
    ///      ▼
    /// Click product again
    ///      │
    ///      ▼
    /// OutOfStock { product: "Arroz Pérola 1kg", available: 25 }
    ///      │
    ///      ▼
    /// Notice: "Insufficient stock for Arroz Pérola 1kg (25 available)"
    /// ```
    #[error("Insufficient stock for {product} ({available} available)")]
    OutOfStock { product: String, available: i64 },

    /// Checkout opened or committed with no lines.
    #[error("The cart is empty")]
    EmptyCart,

    /// Cash tendered is below the cart total at commit time.
    #[error("Insufficient payment: total {total}, tendered {tendered}")]
    InsufficientPayment { total: Money, tendered: Money },

    /// An operation referenced a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(String),

    /// Commit requested while no checkout is open.
    #[error("No checkout in progress")]
    CheckoutClosed,
}

impl PosError {
    /// Silent errors are logged but produce no notice.
    pub fn is_silent(&self) -> bool {
        matches!(self, PosError::NotFound(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while loading the catalog and when parsing values that arrive as
/// text (payment method names, role names).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value exceeds the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Invalid format (e.g., whitespace inside an id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with PosError.
pub type PosResult<T> = Result<T, PosError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PosError::OutOfStock {
            product: "Arroz Pérola 1kg".to_string(),
            available: 25,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Arroz Pérola 1kg (25 available)"
        );

        let err = PosError::InsufficientPayment {
            total: Money::from_major(500),
            tendered: Money::from_major(400),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: total 500.00, tendered 400.00"
        );
    }

    #[test]
    fn test_only_not_found_is_silent() {
        assert!(PosError::NotFound("p1".to_string()).is_silent());
        assert!(!PosError::EmptyCart.is_silent());
        assert!(!PosError::CheckoutClosed.is_silent());
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "product id".to_string(),
            value: "p1".to_string(),
        };
        assert_eq!(err.to_string(), "product id 'p1' already exists");
    }
}
