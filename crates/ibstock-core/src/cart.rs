//! # Cart Engine
//!
//! Owns the cart lines of the sale in progress and derives totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Frontend Action          Cart method             Cart Change           │
//! │  ───────────────          ───────────             ───────────           │
//! │                                                                         │
//! │  Click Product ─────────► add_item() ───────────► push / qty + 1        │
//! │                                                                         │
//! │  +/- or typed qty ──────► set_quantity() ───────► qty = n (n < 1 drops) │
//! │                                                                         │
//! │  Click Remove ──────────► remove_item() ────────► line removed          │
//! │                                                                         │
//! │  Click Trash ───────────► clear() ──────────────► lines.clear()         │
//! │                                                                         │
//! │  Render ────────────────► total() ──────────────► (derived, read only)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Snapshot
//! Each line copies the product's stock when it is created and uses that as
//! its quantity ceiling for the rest of the sale. Later catalog changes do
//! not move the ceiling.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PosError, PosResult};
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// A single product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product id, unique within the cart.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Always within `1..=stock_snapshot`.
    pub quantity: i64,

    /// Product stock at time of adding; the quantity ceiling.
    pub stock_snapshot: i64,

    pub image_ref: Option<String>,
}

impl CartLine {
    /// Creates a line with quantity 1, freezing name, price and stock.
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
            stock_snapshot: product.stock,
            image_ref: product.image_ref.clone(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether the "+" button should be disabled.
    #[inline]
    pub fn at_stock_limit(&self) -> bool {
        self.quantity >= self.stock_snapshot
    }

    fn out_of_stock(&self) -> PosError {
        PosError::OutOfStock {
            product: self.name.clone(),
            available: self.stock_snapshot,
        }
    }
}

// =============================================================================
// Quantity Change
// =============================================================================

/// What `set_quantity` did to the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity set to the contained value.
    Updated(i64),
    /// Quantity dropped below 1, the line was removed.
    Removed(CartLine),
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product raises quantity)
/// - Lines keep the position of their first add
/// - Every line has `1 <= quantity <= stock_snapshot`
/// - `total()` is computed on every call, never cached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product not in cart: new line with quantity 1 (rejected when the
    ///   product has no stock at all)
    /// - Product in cart: quantity + 1, unless the line already sits at its
    ///   stock snapshot
    ///
    /// ## Returns
    /// The line's new quantity.
    pub fn add_item(&mut self, product: &Product) -> PosResult<i64> {
        if let Some(line) = self.line_mut(&product.id) {
            if line.at_stock_limit() {
                return Err(line.out_of_stock());
            }
            line.quantity += 1;
            return Ok(line.quantity);
        }

        if !product.in_stock() {
            return Err(PosError::OutOfStock {
                product: product.name.clone(),
                available: product.stock,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(1)
    }

    /// Sets the quantity of a line exactly.
    ///
    /// ## Behavior
    /// - `quantity < 1`: removes the line (same as `remove_item`)
    /// - `quantity > stock_snapshot`: `OutOfStock`, line unchanged
    /// - product not in cart: `NotFound`
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> PosResult<QuantityChange> {
        if quantity < 1 {
            return self.remove_item(product_id).map(QuantityChange::Removed);
        }

        let line = self
            .line_mut(product_id)
            .ok_or_else(|| PosError::NotFound(product_id.to_string()))?;

        if quantity > line.stock_snapshot {
            return Err(line.out_of_stock());
        }

        line.quantity = quantity;
        Ok(QuantityChange::Updated(quantity))
    }

    /// Removes a line, returning it.
    pub fn remove_item(&mut self, product_id: &str) -> PosResult<CartLine> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| PosError::NotFound(product_id.to_string()))?;

        Ok(self.lines.remove(idx))
    }

    /// Clears all lines, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        removed
    }

    /// Sum of every line total, recomputed on each call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
