//! # Sale Commands
//!
//! The payment dialog: method, amount tendered, confirm or cancel.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Flow                                         │
//! │                                                                         │
//! │  open_checkout ──► set_payment_method("cash")                           │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                    set_amount_tendered("600") ──► change 100.00 MT      │
//! │                          │                                              │
//! │              ┌───────────┴───────────┐                                  │
//! │              ▼                       ▼                                  │
//! │       confirm_payment          cancel_checkout                          │
//! │       receipt V0423            cart kept                                │
//! │       cart + customer cleared                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ibstock_core::{
    CheckoutPhase, CompletedSale, Intent, Money, Notice, PaymentMethod, PosSession, Route,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AuthState, ConfigState, SessionState};

/// Confirmation shown after a sale is committed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    pub receipt_number: String,
    pub store_name: String,
    pub total: Money,
    pub total_display: String,
    pub payment_method: PaymentMethod,
    pub payment_label: String,
    pub tendered: Option<Money>,
    pub change: Option<Money>,
    pub change_display: Option<String>,
    pub customer_id: Option<String>,
    pub line_count: usize,
    pub total_quantity: i64,
    /// RFC 3339
    pub completed_at: String,
}

impl SaleDto {
    fn new(sale: &CompletedSale, config: &ConfigState) -> Self {
        SaleDto {
            id: sale.id.to_string(),
            receipt_number: sale.receipt.receipt_number.clone(),
            store_name: config.store_name.clone(),
            total: sale.total,
            total_display: config.format_currency(sale.total),
            payment_method: sale.payment_method,
            payment_label: sale.payment_method.label().to_string(),
            tendered: sale.tendered,
            change: sale.change,
            change_display: sale.change.map(|c| config.format_currency(c)),
            customer_id: sale.customer_id.clone(),
            line_count: sale.line_count,
            total_quantity: sale.total_quantity,
            completed_at: sale.completed_at.to_rfc3339(),
        }
    }
}

/// Payment dialog state plus what the last command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub phase: CheckoutPhase,
    pub payment_method: PaymentMethod,
    /// Raw text of the amount box.
    pub amount_tendered: String,
    pub total: Money,
    pub total_display: String,
    pub change: Option<Money>,
    pub change_display: Option<String>,
    pub can_commit: bool,
    pub notices: Vec<Notice>,
    pub sale: Option<SaleDto>,
}

impl CheckoutResponse {
    fn new(
        session: &PosSession,
        config: &ConfigState,
        notices: Vec<Notice>,
        sale: Option<&CompletedSale>,
    ) -> Self {
        let view = session.checkout_view();
        CheckoutResponse {
            phase: view.phase,
            payment_method: view.payment_method,
            amount_tendered: view.amount_tendered,
            total: view.total,
            total_display: config.format_currency(view.total),
            change: view.change,
            change_display: view.change.map(|c| config.format_currency(c)),
            can_commit: view.can_commit,
            notices,
            sale: sale.map(|s| SaleDto::new(s, config)),
        }
    }
}

fn apply(session: &SessionState, config: &ConfigState, intent: Intent) -> CheckoutResponse {
    session.apply(intent, |outcome, s| {
        CheckoutResponse::new(s, config, outcome.notices, outcome.sale.as_ref())
    })
}

/// Opens the payment dialog. Empty cart: Error notice, stays closed.
pub fn open_checkout(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CheckoutResponse, ApiError> {
    debug!("open_checkout command");
    auth.require(Route::Pos)?;

    Ok(apply(session, config, Intent::OpenCheckout))
}

/// Chooses how the customer pays.
///
/// ## Arguments
/// * `method` - `cash`, `card`, `mkesh`, `kesh` or `transfer`
pub fn set_payment_method(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
    method: String,
) -> Result<CheckoutResponse, ApiError> {
    debug!(method = %method, "set_payment_method command");
    auth.require(Route::Pos)?;

    let method: PaymentMethod = method.parse()?;
    Ok(apply(session, config, Intent::SetPaymentMethod(method)))
}

/// Records the amount box as typed.
pub fn set_amount_tendered(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
    amount: String,
) -> Result<CheckoutResponse, ApiError> {
    debug!(amount = %amount, "set_amount_tendered command");
    auth.require(Route::Pos)?;

    Ok(apply(session, config, Intent::SetAmountTendered(amount)))
}

pub fn get_checkout(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CheckoutResponse, ApiError> {
    debug!("get_checkout command");
    auth.require(Route::Pos)?;

    Ok(session.with_session(|s| CheckoutResponse::new(s, config, Vec::new(), None)))
}

/// Confirms the payment and finalizes the sale.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Confirm clicked                                                       │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  Cash short? ──YES──► Error notice, dialog stays open                   │
/// │       │                                                                 │
/// │       NO                                                                │
/// │       ▼                                                                 │
/// │  sale = { receipt: "V0423", change: 100.00 MT, ... }                    │
/// │  cart cleared, customer cleared, dialog closed                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn confirm_payment(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CheckoutResponse, ApiError> {
    debug!("confirm_payment command");
    let role = auth.require(Route::Pos)?;

    let response = apply(session, config, Intent::Commit);
    if let Some(sale) = &response.sale {
        info!(receipt = %sale.receipt_number, %role, "Payment confirmed");
    }
    Ok(response)
}

/// Closes the dialog without selling. Cart and customer stay.
pub fn cancel_checkout(
    auth: &AuthState,
    session: &SessionState,
    config: &ConfigState,
) -> Result<CheckoutResponse, ApiError> {
    debug!("cancel_checkout command");
    auth.require(Route::Pos)?;

    Ok(apply(session, config, Intent::Cancel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, update_cart_item};
    use crate::state::CatalogState;
    use ibstock_core::NoticeSeverity;

    fn setup() -> (AuthState, CatalogState, SessionState, ConfigState) {
        let auth = AuthState::default();
        auth.login("seller@ibstock.com", "password123").unwrap();
        (
            auth,
            CatalogState::seeded().unwrap(),
            SessionState::new(Some(11)),
            ConfigState::default(),
        )
    }

    #[test]
    fn test_cash_sale() {
        let (auth, catalog, session, config) = setup();
        add_to_cart(&auth, &catalog, &session, &config, "p1".into()).unwrap();
        update_cart_item(&auth, &session, &config, "p1".into(), 5).unwrap();

        let resp = open_checkout(&auth, &session, &config).unwrap();
        assert_eq!(resp.phase, CheckoutPhase::Open);
        assert_eq!(resp.total_display, "500.00 MT");
        assert!(!resp.can_commit);

        set_amount_tendered(&auth, &session, &config, "400".into()).unwrap();
        let resp = confirm_payment(&auth, &session, &config).unwrap();
        assert!(resp.sale.is_none());
        assert_eq!(resp.notices[0].severity, NoticeSeverity::Error);
        assert_eq!(resp.phase, CheckoutPhase::Open);

        let resp = set_amount_tendered(&auth, &session, &config, "600".into()).unwrap();
        assert_eq!(resp.change_display.as_deref(), Some("100.00 MT"));

        let resp = confirm_payment(&auth, &session, &config).unwrap();
        let sale = resp.sale.unwrap();
        assert!(sale.receipt_number.starts_with('V'));
        assert_eq!(sale.receipt_number.len(), 5);
        assert_eq!(sale.payment_label, "Dinheiro");
        assert_eq!(sale.change, Some(Money::from_major(100)));
        assert_eq!(resp.phase, CheckoutPhase::Closed);
        assert_eq!(resp.total, Money::zero());
    }

    #[test]
    fn test_bad_payment_method() {
        let (auth, _, session, config) = setup();
        let err = set_payment_method(&auth, &session, &config, "cheque".into()).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[test]
    fn test_cancel_keeps_cart() {
        let (auth, catalog, session, config) = setup();
        add_to_cart(&auth, &catalog, &session, &config, "p7".into()).unwrap();
        open_checkout(&auth, &session, &config).unwrap();
        set_payment_method(&auth, &session, &config, "transfer".into()).unwrap();

        let resp = cancel_checkout(&auth, &session, &config).unwrap();
        assert_eq!(resp.phase, CheckoutPhase::Closed);
        assert_eq!(resp.payment_method, PaymentMethod::Cash);
        assert_eq!(resp.total, Money::from_major(95));

        let resp = get_checkout(&auth, &session, &config).unwrap();
        assert_eq!(resp.amount_tendered, "");
    }
}
