//! # POS Session
//!
//! One register's worth of state and the reducer that drives it.
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Presentation ── Intent ──► PosSession::apply()                         │
//! │                                   │                                     │
//! │                 ┌─────────────────┼──────────────────┐                  │
//! │                 ▼                 ▼                  ▼                  │
//! │               Cart        CustomerSelector    CheckoutSession           │
//! │                 │                 │                  │                  │
//! │                 └──── Ok / PosError ─────────────────┘                  │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │  Presentation ◄── Outcome { notices, sale } ──                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each intent runs to completion before the next one. Errors never escape
//! `apply`: they turn into Error notices (or nothing, for silent ones) and
//! the state they would have changed stays as it was.

use serde::Serialize;
use tracing::debug;

use crate::cart::{Cart, QuantityChange};
use crate::catalog::{Catalog, CatalogFilter};
use crate::checkout::{CheckoutSession, CheckoutView};
use crate::customer::CustomerSelector;
use crate::error::{PosError, PosResult};
use crate::notice::Notice;
use crate::receipt::{RandomReceipts, ReceiptIssuer};
use crate::types::{CompletedSale, Customer, PaymentMethod, Product};

// =============================================================================
// Intents
// =============================================================================

/// Something the cashier did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddItem(Product),
    SetQuantity { product_id: String, quantity: i64 },
    RemoveItem(String),
    ClearCart,
    SelectCustomer(Customer),
    ClearCustomer,
    SetCategory(String),
    SetSearchTerm(String),
    OpenCheckout,
    SetPaymentMethod(PaymentMethod),
    SetAmountTendered(String),
    Commit,
    Cancel,
}

impl Intent {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddItem(_) => "add_item",
            Intent::SetQuantity { .. } => "set_quantity",
            Intent::RemoveItem(_) => "remove_item",
            Intent::ClearCart => "clear_cart",
            Intent::SelectCustomer(_) => "select_customer",
            Intent::ClearCustomer => "clear_customer",
            Intent::SetCategory(_) => "set_category",
            Intent::SetSearchTerm(_) => "set_search_term",
            Intent::OpenCheckout => "open_checkout",
            Intent::SetPaymentMethod(_) => "set_payment_method",
            Intent::SetAmountTendered(_) => "set_amount_tendered",
            Intent::Commit => "commit",
            Intent::Cancel => "cancel",
        }
    }
}

/// What applying an intent produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub notices: Vec<Notice>,
    /// Present only after a successful commit.
    pub sale: Option<CompletedSale>,
}

impl Outcome {
    fn notice(notice: Notice) -> Self {
        Outcome {
            notices: vec![notice],
            sale: None,
        }
    }

    /// Whether any notice is an error.
    pub fn is_rejected(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}

// =============================================================================
// Session
// =============================================================================

/// State of a single register: cart, customer, product filter and the
/// payment dialog.
#[derive(Debug)]
pub struct PosSession<I = RandomReceipts> {
    cart: Cart,
    customer: CustomerSelector,
    filter: CatalogFilter,
    checkout: CheckoutSession,
    receipts: I,
}

impl PosSession<RandomReceipts> {
    /// A session whose receipt numbers are seeded from the OS.
    pub fn new() -> Self {
        Self::with_issuer(RandomReceipts::from_entropy())
    }
}

impl Default for PosSession<RandomReceipts> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ReceiptIssuer> PosSession<I> {
    pub fn with_issuer(receipts: I) -> Self {
        PosSession {
            cart: Cart::new(),
            customer: CustomerSelector::new(),
            filter: CatalogFilter::default(),
            checkout: CheckoutSession::new(),
            receipts,
        }
    }

    /// Applies one intent.
    pub fn apply(&mut self, intent: Intent) -> Outcome {
        let name = intent.name();
        debug!(intent = name, "Applying intent");

        match self.reduce(intent) {
            Ok(outcome) => outcome,
            Err(err) if err.is_silent() => {
                debug!(intent = name, error = %err, "Intent ignored");
                Outcome::default()
            }
            Err(err) => {
                debug!(intent = name, error = %err, "Intent rejected");
                Outcome::notice(Notice::from(&err))
            }
        }
    }

    fn reduce(&mut self, intent: Intent) -> PosResult<Outcome> {
        let outcome = match intent {
            Intent::AddItem(product) => {
                let quantity = self.cart.add_item(&product)?;
                debug!(product_id = %product.id, quantity, "Item added");
                Outcome::notice(Notice::success(format!("{} added to cart", product.name)))
            }

            Intent::SetQuantity {
                product_id,
                quantity,
            } => match self.cart.set_quantity(&product_id, quantity)? {
                QuantityChange::Updated(_) => Outcome::default(),
                QuantityChange::Removed(line) => Outcome::notice(removed(&line.name)),
            },

            Intent::RemoveItem(product_id) => {
                let line = self.cart.remove_item(&product_id)?;
                Outcome::notice(removed(&line.name))
            }

            Intent::ClearCart => {
                if self.cart.clear() > 0 {
                    Outcome::notice(Notice::info("Cart cleared"))
                } else {
                    Outcome::default()
                }
            }

            Intent::SelectCustomer(customer) => {
                let customer = self.customer.select(customer);
                Outcome::notice(Notice::success(format!("Customer {} selected", customer.name)))
            }

            Intent::ClearCustomer => {
                self.customer.clear();
                Outcome::default()
            }

            Intent::SetCategory(category) => {
                self.filter.set_category(category);
                Outcome::default()
            }

            Intent::SetSearchTerm(term) => {
                self.filter.set_search_term(term);
                Outcome::default()
            }

            Intent::OpenCheckout => {
                self.checkout.open(&self.cart)?;
                Outcome::default()
            }

            Intent::SetPaymentMethod(method) => {
                if !self.checkout.set_payment_method(method) {
                    debug!(%method, "Checkout closed, payment method ignored");
                }
                Outcome::default()
            }

            Intent::SetAmountTendered(raw) => {
                if !self.checkout.set_amount_tendered(raw) {
                    debug!("Checkout closed, amount ignored");
                }
                Outcome::default()
            }

            Intent::Commit => {
                let sale = self.checkout.commit(
                    &mut self.cart,
                    &mut self.customer,
                    &mut self.receipts,
                )?;
                Outcome {
                    notices: vec![Notice::success(format!(
                        "Sale completed. Receipt: {}",
                        sale.receipt
                    ))],
                    sale: Some(sale),
                }
            }

            Intent::Cancel => {
                self.checkout.cancel();
                Outcome::default()
            }
        };

        Ok(outcome)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.selected()
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn checkout(&self) -> &CheckoutSession {
        &self.checkout
    }

    pub fn checkout_view(&self) -> CheckoutView {
        self.checkout.view(&self.cart)
    }

    /// The product grid under the active category and search term.
    pub fn visible_products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.filter.apply(catalog.products())
    }
}

fn removed(name: &str) -> Notice {
    Notice::info(format!("{name} removed from cart"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::notice::NoticeSeverity;
    use crate::types::Category;

    fn product(id: &str, name: &str, price: i64, stock: i64, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: Money::from_major(price),
            stock,
            category_id: category.to_string(),
            image_ref: None,
        }
    }

    fn rice() -> Product {
        product("p1", "Rice", 100, 25, "groceries")
    }

    fn ana() -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Ana Silva".to_string(),
            phone: "84 123 4567".to_string(),
            outstanding_credit: Money::zero(),
        }
    }

    fn session() -> PosSession {
        PosSession::with_issuer(RandomReceipts::seeded(2024))
    }

    fn severities(outcome: &Outcome) -> Vec<NoticeSeverity> {
        outcome.notices.iter().map(|n| n.severity).collect()
    }

    fn set_qty(id: &str, quantity: i64) -> Intent {
        Intent::SetQuantity {
            product_id: id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_rice_flow_notices() {
        let mut pos = session();

        let out = pos.apply(Intent::AddItem(rice()));
        assert_eq!(severities(&out), vec![NoticeSeverity::Success]);
        assert_eq!(pos.cart().total(), Money::from_major(100));

        pos.apply(Intent::AddItem(rice()));
        assert_eq!(pos.cart().line("p1").unwrap().quantity, 2);
        assert_eq!(pos.cart().total(), Money::from_major(200));

        let out = pos.apply(set_qty("p1", 30));
        assert_eq!(severities(&out), vec![NoticeSeverity::Error]);
        assert_eq!(out.notices[0].message, "Insufficient stock for Rice (25 available)");
        assert_eq!(pos.cart().line("p1").unwrap().quantity, 2);

        let out = pos.apply(set_qty("p1", 5));
        assert!(out.notices.is_empty());
        assert_eq!(pos.cart().total(), Money::from_major(500));
    }

    #[test]
    fn test_payment_scenario() {
        let mut pos = session();
        pos.apply(Intent::AddItem(rice()));
        pos.apply(set_qty("p1", 5));
        pos.apply(Intent::OpenCheckout);
        pos.apply(Intent::SetAmountTendered("400".to_string()));

        let out = pos.apply(Intent::Commit);
        assert!(out.is_rejected());
        assert!(out.sale.is_none());
        assert!(pos.checkout().is_open());
        assert!(pos.checkout_view().change.is_none());

        pos.apply(Intent::SetAmountTendered("600".to_string()));
        assert_eq!(pos.checkout_view().change, Some(Money::from_major(100)));

        let out = pos.apply(Intent::Commit);
        let sale = out.sale.as_ref().expect("sale");
        let number = &sale.receipt.receipt_number;
        assert_eq!(number.len(), 5);
        assert!(number.starts_with('V'));
        assert!(number[1..].chars().all(|c| c.is_ascii_digit()));

        assert_eq!(severities(&out), vec![NoticeSeverity::Success]);
        assert!(out.notices[0].message.contains(number.as_str()));

        assert!(pos.cart().is_empty());
        assert!(!pos.checkout().is_open());
        assert_eq!(pos.checkout().payment_method(), PaymentMethod::Cash);
        assert_eq!(pos.checkout().amount_tendered(), "");
    }

    #[test]
    fn test_empty_cart_cannot_open_checkout() {
        let mut pos = session();
        let out = pos.apply(Intent::OpenCheckout);
        assert_eq!(out.notices[0].message, "The cart is empty");
        assert!(!pos.checkout().is_open());
    }

    #[test]
    fn test_non_cash_commit_ignores_amount() {
        let mut pos = session();
        pos.apply(Intent::AddItem(rice()));
        pos.apply(Intent::OpenCheckout);
        pos.apply(Intent::SetPaymentMethod(PaymentMethod::MobileWalletB));
        pos.apply(Intent::SetAmountTendered(String::new()));

        let out = pos.apply(Intent::Commit);
        assert_eq!(out.sale.unwrap().payment_method, PaymentMethod::MobileWalletB);
        assert!(pos.cart().is_empty());
    }

    #[test]
    fn test_commit_clears_customer_but_cancel_does_not() {
        let mut pos = session();
        pos.apply(Intent::SelectCustomer(ana()));
        pos.apply(Intent::AddItem(rice()));

        pos.apply(Intent::OpenCheckout);
        pos.apply(Intent::Cancel);
        assert_eq!(pos.customer().unwrap().id, "c1");
        assert_eq!(pos.cart().len(), 1);

        pos.apply(Intent::OpenCheckout);
        pos.apply(Intent::SetAmountTendered("100".to_string()));
        let out = pos.apply(Intent::Commit);
        assert_eq!(out.sale.unwrap().customer_id.as_deref(), Some("c1"));
        assert!(pos.customer().is_none());
    }

    #[test]
    fn test_customer_and_cart_are_independent() {
        let mut pos = session();
        pos.apply(Intent::AddItem(rice()));

        let out = pos.apply(Intent::SelectCustomer(ana()));
        assert_eq!(out.notices[0].message, "Customer Ana Silva selected");
        assert_eq!(pos.cart().len(), 1);

        let out = pos.apply(Intent::ClearCart);
        assert_eq!(severities(&out), vec![NoticeSeverity::Info]);
        assert!(pos.customer().is_some());

        let out = pos.apply(Intent::ClearCustomer);
        assert!(out.notices.is_empty());
        pos.apply(Intent::AddItem(rice()));
        assert_eq!(pos.cart().len(), 1);
    }

    #[test]
    fn test_clear_empty_cart_is_quiet() {
        let mut pos = session();
        assert!(pos.apply(Intent::ClearCart).notices.is_empty());
    }

    #[test]
    fn test_unknown_product_is_silent() {
        let mut pos = session();
        assert_eq!(pos.apply(Intent::RemoveItem("ghost".to_string())), Outcome::default());
        assert_eq!(pos.apply(set_qty("ghost", 3)), Outcome::default());
        assert_eq!(pos.apply(set_qty("ghost", 0)), Outcome::default());
    }

    #[test]
    fn test_quantity_zero_removes_with_notice() {
        let mut pos = session();
        pos.apply(Intent::AddItem(rice()));
        let out = pos.apply(set_qty("p1", 0));
        assert_eq!(out.notices, vec![Notice::info("Rice removed from cart")]);
        assert!(pos.cart().is_empty());
    }

    #[test]
    fn test_commit_without_open_checkout() {
        let mut pos = session();
        pos.apply(Intent::AddItem(rice()));
        let out = pos.apply(Intent::Commit);
        assert!(out.is_rejected());
        assert_eq!(pos.cart().len(), 1);
    }

    #[test]
    fn test_payment_edits_ignored_while_closed() {
        let mut pos = session();
        pos.apply(Intent::SetPaymentMethod(PaymentMethod::Card));
        pos.apply(Intent::SetAmountTendered("50".to_string()));
        assert_eq!(pos.checkout(), &CheckoutSession::default());
    }

    #[test]
    fn test_filter_intents() {
        let catalog = Catalog::new(
            vec![
                Category::new("groceries", "Mercearia"),
                Category::new("beverages", "Bebidas"),
            ],
            vec![
                rice(),
                product("p5", "Refrigerante Cola 2L", 130, 24, "beverages"),
                product("p6", "Água Mineral 5L", 85, 40, "beverages"),
            ],
            vec![],
        )
        .unwrap();

        let mut pos = session();
        assert_eq!(pos.visible_products(&catalog).len(), 3);

        pos.apply(Intent::SetCategory("beverages".to_string()));
        let ids: Vec<&str> = pos
            .visible_products(&catalog)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p5", "p6"]);

        pos.apply(Intent::SetSearchTerm("cola".to_string()));
        let ids: Vec<&str> = pos
            .visible_products(&catalog)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p5"]);
    }

    #[test]
    fn test_seeded_sessions_issue_same_receipts() {
        let run = || {
            let mut pos = session();
            pos.apply(Intent::AddItem(rice()));
            pos.apply(Intent::OpenCheckout);
            pos.apply(Intent::SetPaymentMethod(PaymentMethod::Card));
            pos.apply(Intent::Commit).sale.unwrap().receipt
        };
        assert_eq!(run(), run());
    }
}
