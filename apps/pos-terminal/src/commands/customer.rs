//! # Customer Commands
//!
//! Customer directory and the customer attached to the current sale.

use ibstock_core::{Customer, Intent, Money, Notice, Route};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{AuthState, CatalogState, ConfigState, SessionState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub outstanding_credit: Money,
    pub credit_display: String,
    /// Shows the credit warning badge.
    pub has_outstanding_credit: bool,
}

impl CustomerDto {
    fn new(c: &Customer, config: &ConfigState) -> Self {
        CustomerDto {
            id: c.id.clone(),
            name: c.name.clone(),
            phone: c.phone.clone(),
            outstanding_credit: c.outstanding_credit,
            credit_display: config.format_currency(c.outstanding_credit),
            has_outstanding_credit: c.has_outstanding_credit(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub selected: Option<CustomerDto>,
    pub notices: Vec<Notice>,
}

/// Lists the customer directory.
pub fn list_customers(
    auth: &AuthState,
    catalog: &CatalogState,
    config: &ConfigState,
) -> Result<Vec<CustomerDto>, ApiError> {
    debug!("list_customers command");
    auth.require(Route::Customers)?;

    Ok(catalog
        .catalog()
        .customers()
        .iter()
        .map(|c| CustomerDto::new(c, config))
        .collect())
}

/// Attaches a customer to the current sale, replacing any previous one.
pub fn select_customer(
    auth: &AuthState,
    catalog: &CatalogState,
    session: &SessionState,
    config: &ConfigState,
    customer_id: String,
) -> Result<CustomerResponse, ApiError> {
    debug!(customer_id = %customer_id, "select_customer command");
    auth.require(Route::Pos)?;

    let customer = catalog
        .catalog()
        .customer(&customer_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Customer", &customer_id))?;

    Ok(session.apply(Intent::SelectCustomer(customer), |outcome, s| {
        CustomerResponse {
            selected: s.customer().map(|c| CustomerDto::new(c, config)),
            notices: outcome.notices,
        }
    }))
}

/// Detaches the customer. The cart is untouched.
pub fn clear_customer(
    auth: &AuthState,
    session: &SessionState,
) -> Result<CustomerResponse, ApiError> {
    debug!("clear_customer command");
    auth.require(Route::Pos)?;

    Ok(session.apply(Intent::ClearCustomer, |outcome, _| CustomerResponse {
        selected: None,
        notices: outcome.notices,
    }))
}
