//! Customer selection for the sale in progress.
//!
//! At most one customer is attached at a time. Selection never touches the
//! cart and the cart never touches the selection, except that a committed
//! sale clears both.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Customer;

/// Tracks the currently selected customer, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSelector {
    selected: Option<Customer>,
}

impl CustomerSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous selection.
    pub fn select(&mut self, customer: Customer) -> &Customer {
        self.selected.insert(customer)
    }

    /// Drops the selection, returning what was selected.
    pub fn clear(&mut self) -> Option<Customer> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&Customer> {
        self.selected.as_ref()
    }
}
