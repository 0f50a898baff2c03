//! # Domain Types
//!
//! Core domain types shared by the cart, catalog and checkout.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  Cash (default) │       │
//! │  │  name           │   │  name, phone    │   │  Card           │       │
//! │  │  unit_price     │   │  outstanding_   │   │  mKesh / Kesh   │       │
//! │  │  stock          │   │    credit       │   │  Transfer       │       │
//! │  │  category_id    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Receipt      │   │  CompletedSale  │  output only, never stored   │
//! │  │  V0423          │   │  id, total, ... │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;

/// Category id meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Category
// =============================================================================

/// A product category shown as a tab above the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Owned by the catalog and immutable for the whole session. `stock` is
/// advisory: selling never decrements it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,

    /// Display name shown on the product card and in the cart.
    pub name: String,

    /// Unit price, always positive.
    pub unit_price: Money,

    /// Units available when the catalog was loaded.
    pub stock: i64,

    /// Category this product is listed under.
    pub category_id: String,

    /// Optional image reference (URL or asset key).
    pub image_ref: Option<String>,
}

impl Product {
    /// Checks if at least one unit can be put in a cart.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer from the store's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Amount the customer already owes the store.
    pub outstanding_credit: Money,
}

impl Customer {
    /// Whether the cashier should see a credit warning badge.
    #[inline]
    pub fn has_outstanding_credit(&self) -> bool {
        self.outstanding_credit.is_positive()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settles the sale.
///
/// Only `Cash` is checked against the amount tendered. Every other method
/// is settled outside the POS (card terminal, mobile wallet, bank transfer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash ("Dinheiro").
    #[default]
    #[serde(rename = "cash")]
    Cash,
    /// Card on the external POS terminal.
    #[serde(rename = "card")]
    Card,
    /// mKesh mobile wallet.
    #[serde(rename = "mkesh")]
    MobileWalletA,
    /// Kesh mobile wallet.
    #[serde(rename = "kesh")]
    MobileWalletB,
    /// Bank transfer ("Transferência").
    #[serde(rename = "transfer")]
    Transfer,
}

impl PaymentMethod {
    /// All methods in the order the payment dialog lists them.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::MobileWalletA,
        PaymentMethod::MobileWalletB,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
    ];

    /// Wire name, identical to the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::MobileWalletA => "mkesh",
            PaymentMethod::MobileWalletB => "kesh",
            PaymentMethod::Transfer => "transfer",
        }
    }

    /// Button label shown to the cashier.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Card => "POS",
            PaymentMethod::MobileWalletA => "mKesh",
            PaymentMethod::MobileWalletB => "Kesh",
            PaymentMethod::Transfer => "Transferência",
        }
    }

    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Receipt identifier generated when a sale is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    pub receipt_number: String,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.receipt_number)
    }
}

// =============================================================================
// Completed Sale
// =============================================================================

/// Summary of a committed sale, handed to the front end exactly once.
///
/// Nothing keeps a copy: once the confirmation is rendered the sale is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletedSale {
    #[ts(as = "String")]
    pub id: Uuid,
    pub receipt: Receipt,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Cash handed over; `None` for non-cash methods.
    pub tendered: Option<Money>,
    /// Change returned; `None` for non-cash methods.
    pub change: Option<Money>,
    pub customer_id: Option<String>,
    pub line_count: usize,
    pub total_quantity: i64,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
