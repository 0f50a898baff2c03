//! # State Module
//!
//! Manages terminal state.
//!
//! Instead of one `AppState` holding everything, each concern has its own
//! state type and each command takes only the ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ SessionState │ │ CatalogState │ │  AuthState   │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  Arc<Mutex<  │ │  Arc<        │ │  directory + │ │  store name  │   │
//! │  │  PosSession  │ │   Catalog>   │ │  Mutex<user> │ │  currency    │   │
//! │  │  >>          │ │              │ │              │ │  seed        │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: one intent at a time under the mutex                  │
//! │  • CatalogState / ConfigState: read-only after initialization          │
//! │  • AuthState: signed-in user behind a mutex                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod catalog;
mod config;
mod session;

pub use auth::{AuthState, UserDto};
pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigState, CONFIG_PATH_ENV, DEFAULT_LOG_FILTER};
pub use session::SessionState;
