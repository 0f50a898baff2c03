//! # Config Commands
//!
//! Static settings the front end needs before anyone signs in.

use ibstock_core::PaymentMethod;
use serde::Serialize;
use tracing::debug;

use crate::state::ConfigState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodDto {
    pub id: PaymentMethod,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    /// Buttons of the payment dialog, in display order.
    pub payment_methods: Vec<PaymentMethodDto>,
}

/// Gets the terminal configuration.
pub fn get_config(config: &ConfigState) -> ConfigResponse {
    debug!("get_config command");
    ConfigResponse {
        store_name: config.store_name.clone(),
        currency_code: config.currency_code.clone(),
        currency_symbol: config.currency_symbol.clone(),
        currency_decimals: config.currency_decimals,
        payment_methods: PaymentMethod::ALL
            .into_iter()
            .map(|m| PaymentMethodDto {
                id: m,
                label: m.label().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_methods_in_dialog_order() {
        let resp = get_config(&ConfigState::default());
        let labels: Vec<&str> = resp.payment_methods.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Dinheiro", "mKesh", "Kesh", "POS", "Transferência"]);
        assert_eq!(resp.currency_symbol, "MT");
    }
}
