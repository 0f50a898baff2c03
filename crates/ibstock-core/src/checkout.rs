//! # Checkout State Machine
//!
//! Payment method, amount tendered and the final commit or abort of a sale.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            open() [cart not empty]                                      │
//! │   ┌────────┐ ─────────────────────► ┌────────┐                          │
//! │   │ Closed │                        │  Open  │ ◄── set_payment_method   │
//! │   └────────┘ ◄───────────────────── └────────┘ ◄── set_amount_tendered  │
//! │        ▲        cancel()                 │                              │
//! │        │                                 │ commit()                     │
//! │        │                                 ▼                              │
//! │        │                 ┌──────────────────────────────┐               │
//! │        │                 │ cart empty?   → EmptyCart     │ stays Open   │
//! │        │                 │ cash < total? → Insufficient  │ stays Open   │
//! │        └──── success ─── │ otherwise     → receipt V#### │              │
//! │                          └──────────────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Amount Tendered
//! The cashier's keystrokes are kept verbatim so the input box renders what
//! was typed. The amount is only parsed when it is needed: blank or
//! unparseable text counts as zero and negative amounts are clamped to zero.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use tracing::info;
use uuid::Uuid;

use crate::cart::Cart;
use crate::customer::CustomerSelector;
use crate::error::{PosError, PosResult};
use crate::money::Money;
use crate::receipt::ReceiptIssuer;
use crate::types::{CompletedSale, PaymentMethod};

/// Whether the payment dialog is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Closed,
    Open,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// The payment dialog's state.
///
/// Defaults (Closed, Cash, blank amount) are restored on cancel and after
/// every successful commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutSession {
    phase: CheckoutPhase,
    payment_method: PaymentMethod,
    amount_tendered: String,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.phase == CheckoutPhase::Open
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Raw text typed by the cashier.
    pub fn amount_tendered(&self) -> &str {
        &self.amount_tendered
    }

    /// Opens the payment dialog.
    ///
    /// ## Returns
    /// `Ok(true)` on transition, `Ok(false)` when already open.
    pub fn open(&mut self, cart: &Cart) -> PosResult<bool> {
        if self.is_open() {
            return Ok(false);
        }
        if cart.is_empty() {
            return Err(PosError::EmptyCart);
        }
        self.phase = CheckoutPhase::Open;
        Ok(true)
    }

    /// Chooses the payment method. Ignored while closed.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> bool {
        if !self.is_open() {
            return false;
        }
        self.payment_method = method;
        true
    }

    /// Records the amount as typed. Ignored while closed.
    pub fn set_amount_tendered(&mut self, raw: impl Into<String>) -> bool {
        if !self.is_open() {
            return false;
        }
        self.amount_tendered = raw.into();
        true
    }

    /// Parsed amount tendered, never negative.
    pub fn tendered(&self) -> Money {
        Money::parse_amount(&self.amount_tendered)
            .filter(|m| !m.is_negative())
            .unwrap_or_default()
    }

    /// Change due for a cash sale.
    ///
    /// `None` for non-cash methods and while the tendered amount is below
    /// the total. Display only: commit decides on its own.
    pub fn change(&self, total: Money) -> Option<Money> {
        if !self.payment_method.is_cash() {
            return None;
        }
        let tendered = self.tendered();
        (tendered >= total).then(|| tendered.saturating_sub_floor(total))
    }

    /// Commit preconditions in order; the first failure wins.
    pub fn check_commit(&self, cart: &Cart) -> PosResult<()> {
        if !self.is_open() {
            return Err(PosError::CheckoutClosed);
        }
        if cart.is_empty() {
            return Err(PosError::EmptyCart);
        }
        if self.payment_method.is_cash() {
            let total = cart.total();
            let tendered = self.tendered();
            if tendered < total {
                return Err(PosError::InsufficientPayment { total, tendered });
            }
        }
        Ok(())
    }

    pub fn can_commit(&self, cart: &Cart) -> bool {
        self.check_commit(cart).is_ok()
    }

    /// Finalizes the sale.
    ///
    /// On success the cart and customer selection are cleared and the
    /// session returns to its defaults. On failure nothing changes and the
    /// dialog stays as it was.
    pub fn commit<I>(
        &mut self,
        cart: &mut Cart,
        customer: &mut CustomerSelector,
        issuer: &mut I,
    ) -> PosResult<CompletedSale>
    where
        I: ReceiptIssuer + ?Sized,
    {
        self.check_commit(cart)?;

        let total = cart.total();
        let (tendered, change) = if self.payment_method.is_cash() {
            let tendered = self.tendered();
            (Some(tendered), Some(tendered.saturating_sub_floor(total)))
        } else {
            (None, None)
        };

        let sale = CompletedSale {
            id: Uuid::new_v4(),
            receipt: issuer.issue(),
            total,
            payment_method: self.payment_method,
            tendered,
            change,
            customer_id: customer.selected().map(|c| c.id.clone()),
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            completed_at: Utc::now(),
        };

        info!(
            receipt = %sale.receipt,
            total = %sale.total,
            method = %sale.payment_method,
            lines = sale.line_count,
            "Sale committed"
        );

        cart.clear();
        customer.clear();
        self.reset();

        Ok(sale)
    }

    /// Closes the dialog without touching the cart or customer.
    ///
    /// ## Returns
    /// `false` when there was nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        *self = CheckoutSession::default();
    }

    /// Snapshot for rendering the payment dialog.
    pub fn view(&self, cart: &Cart) -> CheckoutView {
        let total = cart.total();
        CheckoutView {
            phase: self.phase,
            payment_method: self.payment_method,
            amount_tendered: self.amount_tendered.clone(),
            total,
            change: self.change(total),
            can_commit: self.can_commit(cart),
        }
    }
}

// =============================================================================
// Checkout View
// =============================================================================

/// What the payment dialog needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutView {
    pub phase: CheckoutPhase,
    pub payment_method: PaymentMethod,
    pub amount_tendered: String,
    pub total: Money,
    pub change: Option<Money>,
    /// Whether the confirm button is enabled.
    pub can_commit: bool,
}
