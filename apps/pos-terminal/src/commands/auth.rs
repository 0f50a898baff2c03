//! # Auth Commands
//!
//! Sign in and out with the demo accounts.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{AuthState, UserDto};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub signed_out: bool,
}

/// Signs in; the reply names the screen to open.
pub fn login(auth: &AuthState, email: String, password: String) -> Result<UserDto, ApiError> {
    debug!(email = %email, "login command");
    auth.login(&email, &password)
}

/// Signs out. The register's cart is left as it is.
pub fn logout(auth: &AuthState) -> LogoutResponse {
    debug!("logout command");
    LogoutResponse {
        signed_out: auth.logout(),
    }
}

/// The signed-in user, or `null`.
pub fn whoami(auth: &AuthState) -> Option<UserDto> {
    auth.current()
}
