//! Recording credit ledger for assertions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use voxa_core::{CreditLedger, LedgerError};

/// Ledger that captures every debit instead of sending it anywhere.
///
/// Clones share the recorded debits. An optional scripted failure lets tests
/// exercise the meter's log-and-drop path.
#[derive(Clone, Default)]
pub struct RecordingLedger {
    debits: Arc<Mutex<Vec<f64>>>,
    failure: Option<LedgerError>,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `record_debit` call with this error.
    pub fn with_failure(mut self, error: LedgerError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Every debit recorded so far, in order.
    pub fn debits(&self) -> Vec<f64> {
        self.debits.lock().unwrap().clone()
    }

    /// Sum of all recorded debits.
    pub fn total(&self) -> f64 {
        self.debits.lock().unwrap().iter().sum()
    }
}

#[async_trait]
impl CreditLedger for RecordingLedger {
    async fn record_debit(&self, amount: f64) -> Result<(), LedgerError> {
        self.debits.lock().unwrap().push(amount);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
