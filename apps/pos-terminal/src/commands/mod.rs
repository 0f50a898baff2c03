//! # Commands Module
//!
//! All commands exposed to the front end.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── auth.rs      ◄─── login, logout, whoami
//! ├── config.rs    ◄─── Configuration retrieval
//! ├── product.rs   ◄─── Categories, search, product grid
//! ├── customer.rs  ◄─── Customer directory and selection
//! ├── cart.rs      ◄─── Cart manipulation
//! └── sale.rs      ◄─── Payment dialog and commit
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Front end writes one line to stdin:                                    │
//! │  {"command":"update_cart_item","productId":"p1","quantity":5}           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ipc::Request::UpdateCartItem { product_id, quantity }                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn update_cart_item(                                                   │
//! │      auth: &AuthState,        ◄── Only the state it needs              │
//! │      session: &SessionState,                                            │
//! │      config: &ConfigState,                                              │
//! │      product_id: String,      ◄── From the request                     │
//! │      quantity: i64,                                                     │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  One line on stdout: {"ok":true,"data":{...}}                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cart;
pub mod config;
pub mod customer;
pub mod product;
pub mod sale;
