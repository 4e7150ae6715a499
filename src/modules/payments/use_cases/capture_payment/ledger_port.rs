use async_trait::async_trait;
use thiserror::Error;

use crate::modules::payments::core::captured_payment::CapturedPayment;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("payment {payment_id} already recorded")]
    Duplicate { payment_id: String },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Records a capture once per payment id.
    async fn record(&self, payment: CapturedPayment) -> Result<(), LedgerError>;
}
