//! # Auth State
//!
//! The demo account directory and who is signed in.
//!
//! ## Access Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► require(route) ──► guard(current role, route)              │
//! │                                   │                                     │
//! │                    ┌──────────────┼──────────────────┐                  │
//! │                    ▼              ▼                  ▼                  │
//! │                 Granted         Login           Redirect(home)          │
//! │                 run it       UNAUTHORIZED         FORBIDDEN             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use ibstock_core::{guard, Access, Role, Route};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ApiError, ErrorCode};
use crate::fixtures::{self, UserAccount};

/// Signed-in user as sent to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Screen to show after login.
    pub home: Route,
}

impl From<&UserAccount> for UserDto {
    fn from(user: &UserAccount) -> Self {
        UserDto {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            home: user.role.home(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthState {
    directory: Arc<Vec<UserAccount>>,
    current: Arc<Mutex<Option<UserAccount>>>,
}

impl AuthState {
    pub fn new(directory: Vec<UserAccount>) -> Self {
        AuthState {
            directory: Arc::new(directory),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Checks credentials and signs the user in.
    pub fn login(&self, email: &str, password: &str) -> Result<UserDto, ApiError> {
        let user = fixtures::authenticate(&self.directory, email, password)
            .ok_or_else(|| {
                warn!(email, "Rejected login");
                ApiError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
            })?;

        info!(user_id = %user.id, role = %user.role, "User signed in");
        *self.lock() = Some(user.clone());
        Ok(UserDto::from(user))
    }

    /// Signs out; returns whether anyone was signed in.
    pub fn logout(&self) -> bool {
        let previous = self.lock().take();
        if let Some(user) = &previous {
            info!(user_id = %user.id, "User signed out");
        }
        previous.is_some()
    }

    pub fn current(&self) -> Option<UserDto> {
        self.lock().as_ref().map(UserDto::from)
    }

    pub fn role(&self) -> Option<Role> {
        self.lock().as_ref().map(|u| u.role)
    }

    /// Fails unless the signed-in user may open `route`.
    pub fn require(&self, route: Route) -> Result<Role, ApiError> {
        let role = self.role();
        match guard(role, route) {
            Access::Granted => role.ok_or_else(ApiError::unauthorized),
            Access::Login => Err(ApiError::unauthorized()),
            Access::Redirect(home) => Err(ApiError::forbidden(format!(
                "Role {} may not open {route:?}; home is {home:?}",
                role.map_or("anonymous", Role::as_str)
            ))),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<UserAccount>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new(fixtures::demo_users())
    }
}
