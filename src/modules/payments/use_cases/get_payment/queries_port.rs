use crate::modules::payments::core::captured_payment::CapturedPayment;
use async_trait::async_trait;

#[async_trait]
pub trait PaymentQueries {
    async fn find_by_order_id(&self, order_id: &str) -> anyhow::Result<Option<CapturedPayment>>;

    /// Newest capture first.
    async fn list_recent(&self, limit: u64) -> anyhow::Result<Vec<CapturedPayment>>;
}
