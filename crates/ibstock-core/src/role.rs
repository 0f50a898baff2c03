//! # Roles and Route Access
//!
//! Who may see which screen of the back office.
//!
//! ## Role Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Admin ⊇ Supervisor ⊇ Seller                                            │
//! │                                                                         │
//! │  Route        Required     Admin  Supervisor  Seller                    │
//! │  ─────        ────────     ─────  ──────────  ──────                    │
//! │  Dashboard    Supervisor     ✓        ✓         ✗ → redirect to Pos     │
//! │  Pos          (logged in)    ✓        ✓         ✓                       │
//! │  Inventory    (logged in)    ✓        ✓         ✓                       │
//! │  Customers    Seller         ✓        ✓         ✓                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Role
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Supervisor,
    Seller,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Supervisor, Role::Seller];

    const fn rank(self) -> u8 {
        match self {
            Role::Admin => 3,
            Role::Supervisor => 2,
            Role::Seller => 1,
        }
    }

    /// Whether this role satisfies `required`.
    ///
    /// ## Example
    /// ```rust
    /// use ibstock_core::role::Role;
    ///
    /// assert!(Role::Admin.allows(Role::Seller));
    /// assert!(!Role::Seller.allows(Role::Supervisor));
    /// ```
    pub const fn allows(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Screen shown right after login.
    pub const fn home(self) -> Route {
        match self {
            Role::Admin | Role::Supervisor => Route::Dashboard,
            Role::Seller => Route::Pos,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Route
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Pos,
    Inventory,
    Customers,
}

impl Route {
    /// Minimum role, or `None` when any signed-in user may enter.
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Route::Dashboard => Some(Role::Supervisor),
            Route::Customers => Some(Role::Seller),
            Route::Pos | Route::Inventory => None,
        }
    }
}

// =============================================================================
// Guard
// =============================================================================

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "access", content = "route", rename_all = "snake_case")]
pub enum Access {
    Granted,
    /// Nobody is signed in.
    Login,
    /// Signed in but not allowed here; send to the role's home screen.
    Redirect(Route),
}

/// Decides whether `role` may open `route`.
pub fn guard(role: Option<Role>, route: Route) -> Access {
    let Some(role) = role else {
        return Access::Login;
    };

    match route.required_role() {
        Some(required) if !role.allows(required) => Access::Redirect(role.home()),
        _ => Access::Granted,
    }
}
