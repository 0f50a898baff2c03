//! # ibstock-core: Point-of-Sale Logic for IBStock
//!
//! Cart, checkout, catalog filter and access rules of the IBStock back
//! office, as pure state machines with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        IBStock Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end                                    │   │
//! │  │    Product grid ──► Cart panel ──► Payment dialog ──► Toasts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON-lines IPC                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pos-terminal commands                        │   │
//! │  │    add_to_cart, open_checkout, confirm_payment, etc.            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Intent                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ibstock-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │  │   cart    │  │ checkout  │  │  catalog  │  │   │
//! │  │   │  reducer  │  │ CartLine  │  │  receipt  │  │  filter   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NOTICES ARE RETURNED      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - `PosSession` reducer: applies intents, returns notices
//! - [`cart`] - Cart lines, stock ceilings, totals
//! - [`checkout`] - Payment dialog state machine and commit
//! - [`catalog`] - Validated catalog and product filter
//! - [`customer`] - Selected customer
//! - [`receipt`] - Receipt number generation
//! - [`role`] - Roles, routes and the route guard
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`notice`] - Toast messages
//! - [`types`] - Domain types (Product, Customer, PaymentMethod, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use ibstock_core::{Intent, Money, PosSession, Product, RandomReceipts};
//!
//! let rice = Product {
//!     id: "p1".into(),
//!     name: "Arroz Pérola 1kg".into(),
//!     unit_price: Money::from_major(100),
//!     stock: 25,
//!     category_id: "groceries".into(),
//!     image_ref: None,
//! };
//!
//! let mut pos = PosSession::with_issuer(RandomReceipts::seeded(7));
//! pos.apply(Intent::AddItem(rice));
//! pos.apply(Intent::OpenCheckout);
//! pos.apply(Intent::SetAmountTendered("150".into()));
//!
//! let outcome = pos.apply(Intent::Commit);
//! let sale = outcome.sale.unwrap();
//! assert_eq!(sale.change, Some(Money::from_major(50)));
//! assert!(pos.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod money;
pub mod notice;
pub mod receipt;
pub mod role;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, QuantityChange};
pub use catalog::{visible_products, Catalog, CatalogFilter};
pub use checkout::{CheckoutPhase, CheckoutSession, CheckoutView};
pub use customer::CustomerSelector;
pub use error::{PosError, PosResult, ValidationError};
pub use money::Money;
pub use notice::{Notice, NoticeSeverity};
pub use receipt::{RandomReceipts, ReceiptIssuer};
pub use role::{guard, Access, Role, Route};
pub use session::{Intent, Outcome, PosSession};
pub use types::*;
