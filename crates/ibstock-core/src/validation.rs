//! # Validation Module
//!
//! Input validation for catalog data.
//!
//! The catalog is loaded once per session, so every rule here runs before
//! the first intent is applied. Cart and checkout code can then rely on
//! positive prices, non-negative stock and unique ids without re-checking.
//!
//! ## Usage
//! ```rust
//! use ibstock_core::validation::{validate_entity_id, validate_name};
//!
//! assert!(validate_entity_id("product id", "p1").is_ok());
//! assert!(validate_name("name", "Leite 1L").is_ok());
//! assert!(validate_name("name", "  ").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ALL_CATEGORIES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest display name accepted for products, categories and customers.
pub const MAX_NAME_LEN: usize = 200;

/// Longest id accepted for any catalog entity.
pub const MAX_ID_LEN: usize = 64;

/// Highest unit price accepted (1 000 000 000.00).
pub const MAX_UNIT_PRICE: Money = Money::from_major(1_000_000_000);

/// Highest stock level accepted.
///
/// With [`MAX_UNIT_PRICE`], a full line total stays far below `i64::MAX`.
pub const MAX_STOCK: i64 = 1_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity id (product, category or customer).
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - No whitespace (ids travel through the IPC layer unquoted in logs)
pub fn validate_entity_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a category id; `"all"` is reserved for the filter sentinel.
pub fn validate_category_id(id: &str) -> ValidationResult<()> {
    validate_entity_id("category id", id)?;

    if id == ALL_CATEGORIES {
        return Err(ValidationError::InvalidFormat {
            field: "category id".to_string(),
            reason: format!("'{ALL_CATEGORIES}' is reserved"),
        });
    }

    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product's unit price. Free items are not sold at this POS.
///
/// ## Example
/// ```rust
/// use ibstock_core::money::Money;
/// use ibstock_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_major(100)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::TooLarge {
            field: "unit price".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level. Zero is fine (the card is shown greyed out).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    if stock > MAX_STOCK {
        return Err(ValidationError::TooLarge {
            field: "stock".to_string(),
            max: MAX_STOCK.to_string(),
        });
    }

    Ok(())
}

/// Validates a customer's outstanding credit.
pub fn validate_credit(credit: Money) -> ValidationResult<()> {
    if credit.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "outstanding credit".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
