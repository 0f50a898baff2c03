//! # Session State
//!
//! The register's `PosSession` behind a mutex.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every POS command reads or changes it
//! 2. Intents must be applied one at a time, each to completion
//! 3. Commands may be dispatched from more than one thread
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Front end Action         Command                 Intent                │
//! │  ────────────────         ───────                 ──────                │
//! │                                                                         │
//! │  Click Product ──────────► add_to_cart() ───────► AddItem(product)      │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► SetQuantity { .. }    │
//! │                                                                         │
//! │  Pay button ─────────────► open_checkout() ─────► OpenCheckout          │
//! │                                                                         │
//! │  Confirm ────────────────► confirm_payment() ───► Commit                │
//! │                                                                         │
//! │  NOTE: Writes go through `apply`, reads through `with_session`.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ibstock_core::{Intent, Outcome, PosSession, RandomReceipts};
use tracing::debug;

/// Managed POS session state.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<PosSession>>,
}

impl SessionState {
    /// Creates a session; a seed makes receipt numbers repeatable.
    pub fn new(receipt_seed: Option<u64>) -> Self {
        let receipts = match receipt_seed {
            Some(seed) => {
                debug!(seed, "Receipt numbers seeded");
                RandomReceipts::seeded(seed)
            }
            None => RandomReceipts::from_entropy(),
        };

        SessionState {
            session: Arc::new(Mutex::new(PosSession::with_issuer(receipts))),
        }
    }

    // Intents validate before mutating, so a poisoned session is consistent.
    fn lock(&self) -> MutexGuard<'_, PosSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = session_state.with_session(|s| s.cart().total());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PosSession) -> R,
    {
        let session = self.lock();
        f(&session)
    }

    /// Applies one intent and hands the outcome, together with the updated
    /// session, to `f`.
    pub fn apply<F, R>(&self, intent: Intent, f: F) -> R
    where
        F: FnOnce(Outcome, &PosSession) -> R,
    {
        let mut session = self.lock();
        let outcome = session.apply(intent);
        f(outcome, &session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(None)
    }
}
