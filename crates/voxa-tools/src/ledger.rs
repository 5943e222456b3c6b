//! HTTP credit-ledger sink.
//!
//! Carries `{"credits": amount}` debits to the external settings endpoint.
//! The meter fires these without awaiting them and only logs failures, so
//! this client does not retry; the local balance stays authoritative.

use async_trait::async_trait;

use voxa_core::{CreditLedger, LedgerError};

/// Ledger backed by the settings/credits endpoint.
pub struct HttpCreditLedger {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCreditLedger {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CreditLedger for HttpCreditLedger {
    async fn record_debit(&self, amount: f64) -> Result<(), LedgerError> {
        tracing::debug!(amount, endpoint = %self.endpoint, "recording credit debit");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "credits": amount }))
            .send()
            .await
            .map_err(|err| LedgerError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(LedgerError::Endpoint {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
