use crate::modules::payments::core::captured_payment::{CaptureRejected, CapturedPayment};
use crate::modules::payments::core::signature::{self, SignatureError};
use crate::modules::payments::core::webhook_event::WebhookEvent;
use crate::modules::payments::use_cases::capture_payment::ledger_port::{
    LedgerError, PaymentLedger,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("malformed webhook body: {0}")]
    Malformed(String),

    #[error("payment.captured event carries no payment")]
    MissingPayment,

    #[error(transparent)]
    Rejected(#[from] CaptureRejected),

    #[error(transparent)]
    Ledger(LedgerError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Captured(CapturedPayment),
    Duplicate { payment_id: String },
    Ignored { event: String },
}

pub struct CapturePaymentHandler<TLedger>
where
    TLedger: PaymentLedger + Send + Sync + 'static,
{
    webhook_secret: Vec<u8>,
    ledger: Arc<TLedger>,
}

impl<TLedger> CapturePaymentHandler<TLedger>
where
    TLedger: PaymentLedger + Send + Sync + 'static,
{
    pub fn new(webhook_secret: impl Into<Vec<u8>>, ledger: Arc<TLedger>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            ledger,
        }
    }

    pub async fn handle(
        &self,
        signature: Option<&str>,
        body: &[u8],
        received_at: i64,
    ) -> Result<CaptureOutcome, CaptureError> {
        signature::verify(&self.webhook_secret, body, signature)?;

        let event: WebhookEvent =
            serde_json::from_slice(body).map_err(|e| CaptureError::Malformed(e.to_string()))?;
        if !event.is_payment_captured() {
            return Ok(CaptureOutcome::Ignored { event: event.event });
        }

        let entity = event
            .payload
            .payment
            .map(|payment| payment.entity)
            .ok_or(CaptureError::MissingPayment)?;
        let captured_at = event
            .created_at
            .and_then(|seconds| seconds.checked_mul(1000))
            .unwrap_or(received_at);
        let payment = CapturedPayment::from_entity(entity, captured_at)?;

        match self.ledger.record(payment.clone()).await {
            Ok(()) => Ok(CaptureOutcome::Captured(payment)),
            Err(LedgerError::Duplicate { payment_id }) => {
                Ok(CaptureOutcome::Duplicate { payment_id })
            }
            Err(e) => Err(CaptureError::Ledger(e)),
        }
    }
}
