// In memory payment ledger, serving both the capture webhook and the payment queries.
//
// Responsibilities
// - Keep one record per payment id and refuse a second capture of the same payment.
// - Answer lookups by order id and list captures newest first.

use crate::modules::payments::core::captured_payment::CapturedPayment;
use crate::modules::payments::use_cases::capture_payment::ledger_port::{
    LedgerError, PaymentLedger,
};
use crate::modules::payments::use_cases::get_payment::queries_port::PaymentQueries;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryPayments {
    by_payment_id: RwLock<HashMap<String, CapturedPayment>>,
    is_offline: bool,
}

impl InMemoryPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), LedgerError> {
        if self.is_offline {
            return Err(LedgerError::Backend("Payment ledger offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPayments {
    async fn record(&self, payment: CapturedPayment) -> Result<(), LedgerError> {
        self.ensure_online()?;
        let mut guard = self.by_payment_id.write().await;
        if guard.contains_key(&payment.payment_id) {
            return Err(LedgerError::Duplicate {
                payment_id: payment.payment_id,
            });
        }
        guard.insert(payment.payment_id.clone(), payment);
        Ok(())
    }
}

#[async_trait]
impl PaymentQueries for InMemoryPayments {
    async fn find_by_order_id(&self, order_id: &str) -> anyhow::Result<Option<CapturedPayment>> {
        self.ensure_online()?;
        let guard = self.by_payment_id.read().await;
        Ok(guard
            .values()
            .find(|payment| payment.order_id == order_id)
            .cloned())
    }

    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CapturedPayment>> {
        self.ensure_online()?;
        let guard = self.by_payment_id.read().await;
        let mut payments: Vec<CapturedPayment> = guard.values().cloned().collect();
        payments.sort_by(|a, b| {
            b.captured_at
                .cmp(&a.captured_at)
                .then_with(|| a.payment_id.cmp(&b.payment_id))
        });
        payments.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(payments)
    }
}
