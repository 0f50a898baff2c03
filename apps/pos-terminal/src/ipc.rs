//! # JSON-Lines IPC
//!
//! One request per line in, one reply per line out.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin   {"command":"add_to_cart","productId":"p1"}                     │
//! │  stdout  {"ok":true,"data":{"lines":[...],"notices":[...]}}             │
//! │                                                                         │
//! │  stdin   {"command":"add_to_cart","productId":"p99"}                    │
//! │  stdout  {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}      │
//! │                                                                         │
//! │  stdin   not json                                                       │
//! │  stdout  {"ok":false,"error":{"code":"BAD_REQUEST","message":"..."}}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Command names are snake_case, argument names camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::commands;
use crate::error::ApiError;
use crate::state::{AuthState, CatalogState, ConfigState, SessionState};

/// A request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    // Auth & config
    Login {
        email: String,
        password: String,
    },
    Logout,
    Whoami,
    GetConfig,

    // Catalog
    ListCategories,
    ListProducts,
    SetCategory {
        category: String,
    },
    SetSearch {
        #[serde(default)]
        term: String,
    },

    // Customers
    ListCustomers,
    #[serde(rename_all = "camelCase")]
    SelectCustomer {
        customer_id: String,
    },
    ClearCustomer,

    // Cart
    GetCart,
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_id: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateCartItem {
        product_id: String,
        quantity: i64,
    },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart {
        product_id: String,
    },
    ClearCart,

    // Checkout
    OpenCheckout,
    SetPaymentMethod {
        method: String,
    },
    SetAmountTendered {
        #[serde(default)]
        amount: String,
    },
    GetCheckout,
    ConfirmPayment,
    CancelCheckout,
}

/// A reply line.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Reply {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Reply {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Reply {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Every piece of state a command may ask for.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub session: SessionState,
    pub auth: AuthState,
}

impl Terminal {
    /// Builds the terminal around the seeded catalog and demo accounts.
    pub fn new(config: ConfigState) -> Result<Self, ApiError> {
        Ok(Terminal {
            session: SessionState::new(config.receipt_seed),
            catalog: CatalogState::seeded()?,
            auth: AuthState::default(),
            config,
        })
    }

    /// Parses and runs one request line.
    pub fn handle_line(&self, line: &str) -> Reply {
        let result = serde_json::from_str::<Request>(line)
            .map_err(ApiError::from)
            .and_then(|request| self.dispatch(request));

        if let Err(err) = &result {
            warn!(code = ?err.code, message = %err.message, "Command failed");
        }
        Reply::from(result)
    }

    /// Runs a parsed request.
    pub fn dispatch(&self, request: Request) -> Result<Value, ApiError> {
        debug!(?request, "Dispatching");

        let Terminal {
            config,
            catalog,
            session,
            auth,
        } = self;

        use commands::{auth as a, cart, config as cfg, customer, product, sale};

        match request {
            Request::Login { email, password } => to_value(a::login(auth, email, password)?),
            Request::Logout => to_value(a::logout(auth)),
            Request::Whoami => to_value(a::whoami(auth)),
            Request::GetConfig => to_value(cfg::get_config(config)),

            Request::ListCategories => to_value(product::list_categories(auth, catalog)?),
            Request::ListProducts => {
                to_value(product::list_products(auth, catalog, session, config)?)
            }
            Request::SetCategory { category } => to_value(product::set_category(
                auth, catalog, session, config, category,
            )?),
            Request::SetSearch { term } => {
                to_value(product::set_search(auth, catalog, session, config, term)?)
            }

            Request::ListCustomers => to_value(customer::list_customers(auth, catalog, config)?),
            Request::SelectCustomer { customer_id } => to_value(customer::select_customer(
                auth,
                catalog,
                session,
                config,
                customer_id,
            )?),
            Request::ClearCustomer => to_value(customer::clear_customer(auth, session)?),

            Request::GetCart => to_value(cart::get_cart(auth, session, config)?),
            Request::AddToCart { product_id } => {
                to_value(cart::add_to_cart(auth, catalog, session, config, product_id)?)
            }
            Request::UpdateCartItem {
                product_id,
                quantity,
            } => to_value(cart::update_cart_item(
                auth, session, config, product_id, quantity,
            )?),
            Request::RemoveFromCart { product_id } => {
                to_value(cart::remove_from_cart(auth, session, config, product_id)?)
            }
            Request::ClearCart => to_value(cart::clear_cart(auth, session, config)?),

            Request::OpenCheckout => to_value(sale::open_checkout(auth, session, config)?),
            Request::SetPaymentMethod { method } => {
                to_value(sale::set_payment_method(auth, session, config, method)?)
            }
            Request::SetAmountTendered { amount } => {
                to_value(sale::set_amount_tendered(auth, session, config, amount)?)
            }
            Request::GetCheckout => to_value(sale::get_checkout(auth, session, config)?),
            Request::ConfirmPayment => to_value(sale::confirm_payment(auth, session, config)?),
            Request::CancelCheckout => to_value(sale::cancel_checkout(auth, session, config)?),
        }
    }
}

fn to_value<T: Serialize>(data: T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_requests() {
        let req: Request =
            serde_json::from_str(r#"{"command":"update_cart_item","productId":"p1","quantity":3}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::UpdateCartItem {
                product_id: "p1".to_string(),
                quantity: 3
            }
        );

        let req: Request = serde_json::from_str(r#"{"command":"confirm_payment"}"#).unwrap();
        assert_eq!(req, Request::ConfirmPayment);

        let req: Request = serde_json::from_str(r#"{"command":"set_search"}"#).unwrap();
        assert_eq!(req, Request::SetSearch { term: String::new() });
    }

    #[test]
    fn test_reply_shapes() {
        let ok = serde_json::to_value(Reply::from(Ok(Value::Null))).unwrap();
        assert_eq!(ok, serde_json::json!({"ok": true, "data": null}));

        let err = serde_json::to_value(Reply::from(Err(ApiError::unauthorized()))).unwrap();
        assert_eq!(err["ok"], false);
        assert_eq!(err["error"]["code"], "UNAUTHORIZED");
        assert!(err.get("data").is_none());
    }

    #[test]
    fn test_handle_line_errors() {
        let terminal = Terminal::new(ConfigState::default()).unwrap();

        let reply = terminal.handle_line("not json");
        assert_eq!(reply.error.unwrap().code, ErrorCode::BadRequest);

        let reply = terminal.handle_line(r#"{"command":"launch_rockets"}"#);
        assert_eq!(reply.error.unwrap().code, ErrorCode::BadRequest);

        let reply = terminal.handle_line(r#"{"command":"get_cart"}"#);
        assert_eq!(reply.error.unwrap().code, ErrorCode::Unauthorized);
    }
}
