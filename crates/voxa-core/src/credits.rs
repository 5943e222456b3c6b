//! Session credit metering.
//!
//! Usage cost is debited per turn without blocking the interactive path:
//! the balance mutation is synchronous and local, while persistence to the
//! external ledger is fired off as a background task whose failures are
//! logged and dropped. The local balance is the source of truth for the
//! session.
//!
//! Two charging modes exist: a flat per-tool cost for tool-backed turns, and
//! a token-weighted formula for plain turns. No floor is enforced: a
//! balance may go negative; suspending further turns on depletion is policy
//! layered on top, not part of this core.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Per-token rates for the plain-turn charge formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRates {
    pub text_input: f64,
    pub audio_input: f64,
    pub cached_input: f64,
    pub text_output: f64,
    pub audio_output: f64,
}

impl Default for UsageRates {
    fn default() -> Self {
        Self {
            text_input: 0.000_001,
            audio_input: 0.000_02,
            cached_input: 0.000_000_3,
            text_output: 0.000_004,
            audio_output: 0.000_04,
        }
    }
}

/// Token counts reported by the realtime transport for one plain turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnUsage {
    pub text_input_tokens: u64,
    pub audio_input_tokens: u64,
    pub cached_tokens: u64,
    pub output_text_tokens: u64,
    pub output_audio_tokens: u64,
}

impl TurnUsage {
    /// The token-weighted charge for this turn under the given rates.
    pub fn charge(&self, rates: &UsageRates) -> f64 {
        self.text_input_tokens as f64 * rates.text_input
            + self.audio_input_tokens as f64 * rates.audio_input
            + self.cached_tokens as f64 * rates.cached_input
            + self.output_text_tokens as f64 * rates.text_output
            + self.output_audio_tokens as f64 * rates.audio_output
    }
}

/// Outbound boundary to the external credits ledger.
///
/// Implementations carry `{"credits": amount}` deltas to the settings
/// endpoint. The meter fires these without awaiting the interactive path.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    async fn record_debit(&self, amount: f64) -> Result<(), LedgerError>;
}

/// Ledger that records nothing. Useful for tests and offline sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLedger;

#[async_trait]
impl CreditLedger for NullLedger {
    async fn record_debit(&self, _amount: f64) -> Result<(), LedgerError> {
        Ok(())
    }
}

/// Session-scoped credit balance with non-blocking ledger persistence.
pub struct CreditMeter {
    balance: f64,
    rates: UsageRates,
    ledger: Arc<dyn CreditLedger>,
}

impl CreditMeter {
    pub fn new(balance: f64, rates: UsageRates, ledger: Arc<dyn CreditLedger>) -> Self {
        Self {
            balance,
            rates,
            ledger,
        }
    }

    /// A meter with default rates and no ledger persistence.
    pub fn with_null_ledger(balance: f64) -> Self {
        Self::new(balance, UsageRates::default(), Arc::new(NullLedger))
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn rates(&self) -> &UsageRates {
        &self.rates
    }

    /// Debit a flat tool cost. Returns the new balance.
    pub fn debit_tool(&mut self, cost: f64) -> f64 {
        self.debit(cost)
    }

    /// Debit a plain turn by the token-weighted formula. Returns the new
    /// balance.
    pub fn debit_turn(&mut self, usage: &TurnUsage) -> f64 {
        self.debit(usage.charge(&self.rates))
    }

    fn debit(&mut self, amount: f64) -> f64 {
        self.balance -= amount;
        if amount != 0.0 {
            self.persist(amount);
        }
        self.balance
    }

    /// Fire-and-forget ledger persistence. Failures are logged, not retried,
    /// and never roll back the local balance.
    fn persist(&self, amount: f64) {
        let ledger = Arc::clone(&self.ledger);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = ledger.record_debit(amount).await {
                        tracing::warn!(amount, error = %err, "failed to persist credit debit");
                    }
                });
            }
            Err(_) => {
                tracing::warn!(amount, "no async runtime, credit debit not persisted");
            }
        }
    }
}

impl std::fmt::Debug for CreditMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditMeter")
            .field("balance", &self.balance)
            .field("rates", &self.rates)
            .finish_non_exhaustive()
    }
}
