//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payment  │────►│ Receipt  │       │
//! │  │  Cart    │     │          │     │  Dialog  │     │  V####   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart      confirm_payment                     │
//! │                   update_item        (sale.rs)                         │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the whole cart plus the notices the change
//! produced, so the front end redraws from one reply.

use ibstock_core::{Cart, CartLine, Intent, Money, Notice, Route};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{AuthState, CatalogState, ConfigState, SessionState};

/// A cart line as the cart panel shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub unit_price_display: String,
    pub quantity: i64,
    pub stock_snapshot: i64,
    /// Disables the "+" button.
    pub at_stock_limit: bool,
    pub line_total: Money,
    pub line_total_display: String,
    pub image_ref: Option<String>,
}

impl CartLineDto {
    fn new(line: &CartLine, config: &ConfigState) -> Self {
        CartLineDto {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            unit_price_display: config.format_currency(line.unit_price),
            quantity: line.quantity,
            stock_snapshot: line.stock_snapshot,
            at_stock_limit: line.at_stock_limit(),
            line_total: line.line_total(),
            line_total_display: config.format_currency(line.line_total()),
            image_ref: line.image_ref.clone(),
        }
    }
}

/// Cart response including lines, totals and notices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineDto>,
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
    pub total_display: String,
    pub notices: Vec<Notice>,
}

impl CartResponse {
    pub(crate) fn new(cart: &Cart, config: &ConfigState, notices: Vec<Notice>) -> Self {
        CartResponse {
            lines: cart
                .lines()
                .iter()
                .map(|l| CartLineDto::new(l, config))
                .collect(),
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
            total_display: config.format_currency(cart.total()),
            notices,
        }
    }
}

fn apply(
    session: &SessionState,
    config: &ConfigState,
    intent: Intent,
) -> CartResponse {
    session.apply(intent, |outcome, s| {
        CartResponse::new(s.cart(), config, outcome.notices)
    })
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart panel (always visible on the POS screen)                         │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  CARRINHO                                          2 items     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Arroz Pérola 1kg        [-] 2 [+]           200.00 MT         │    │
/// │  │  Refrigerante Cola 2L    [-] 1 [+]           130.00 MT         │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  TOTAL                                       330.00 MT         │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  {"command":"get_cart"} → { lines: [...], total: 33000, ... }           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    auth.require(Route::Pos)?;

    Ok(session.with_session(|s| CartResponse::new(s.cart(), config, Vec::new())))
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity + 1, up to the stock it had when
///   first added
/// - Product not in cart: new line with quantity 1
/// - Out of stock: Error notice, cart unchanged
///
/// ## Arguments
/// * `product_id` - Catalog product id
pub fn add_to_cart(
    auth: &AuthState,
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    product_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");
    auth.require(Route::Pos)?;

    let product = catalog
        .catalog()
        .product(&product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", &product_id))?;

    Ok(apply(session, config, Intent::AddItem(product)))
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity below 1: removes the line
/// - Quantity above the line's stock: Error notice, unchanged
/// - Product not in cart: no change, no notice
pub fn update_cart_item(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
    product_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");
    auth.require(Route::Pos)?;

    Ok(apply(
        session,
        config,
        Intent::SetQuantity {
            product_id,
            quantity,
        },
    ))
}

/// Removes a line from the cart.
pub fn remove_from_cart(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
    product_id: String,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    auth.require(Route::Pos)?;

    Ok(apply(session, config, Intent::RemoveItem(product_id)))
}

/// Clears all lines from the cart. The selected customer stays.
pub fn clear_cart(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    auth.require(Route::Pos)?;

    Ok(apply(session, config, Intent::ClearCart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ibstock_core::NoticeSeverity;

    fn signed_in() -> (AuthState, CatalogState, SessionState, ConfigState) {
        let auth = AuthState::default();
        auth.login("seller@ibstock.com", "password123").unwrap();
        (
            auth,
            CatalogState::seeded().unwrap(),
            SessionState::new(Some(5)),
            ConfigState::default(),
        )
    }

    #[test]
    fn test_add_and_update() {
        let (auth, catalog, session, config) = signed_in();

        let cart = add_to_cart(&auth, &catalog, &session, &config, "p1".into()).unwrap();
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.total_display, "100.00 MT");
        assert_eq!(cart.notices[0].severity, NoticeSeverity::Success);

        let cart = update_cart_item(&auth, &session, &config, "p1".into(), 30).unwrap();
        assert_eq!(cart.lines[0].quantity, 1);
        assert_eq!(cart.notices[0].severity, NoticeSeverity::Error);

        let cart = update_cart_item(&auth, &session, &config, "p1".into(), 25).unwrap();
        assert!(cart.lines[0].at_stock_limit);
        assert_eq!(cart.total, Money::from_major(2_500));
    }

    #[test]
    fn test_unknown_product() {
        let (auth, catalog, session, config) = signed_in();
        let err = add_to_cart(&auth, &catalog, &session, &config, "p99".into()).unwrap_err();
        assert_eq!(err.message, "Product not found: p99");
    }

    #[test]
    fn test_requires_sign_in() {
        let (auth, _, session, config) = signed_in();
        auth.logout();
        assert!(get_cart(&auth, &session, &config).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let (auth, catalog, session, config) = signed_in();
        add_to_cart(&auth, &catalog, &session, &config, "p5".into()).unwrap();
        add_to_cart(&auth, &catalog, &session, &config, "p6".into()).unwrap();

        let cart = remove_from_cart(&auth, &session, &config, "p5".into()).unwrap();
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.notices[0].message, "Refrigerante Cola 2L removed from cart");

        let cart = clear_cart(&auth, &session, &config).unwrap();
        assert!(cart.lines.is_empty());
        assert_eq!(cart.notices.len(), 1);

        let cart = clear_cart(&auth, &session, &config).unwrap();
        assert!(cart.notices.is_empty());
    }
}
