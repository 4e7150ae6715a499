use serde::Serialize;
use thiserror::Error;

use crate::modules::payments::core::webhook_event::PaymentEntity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedPayment {
    pub payment_id: String,
    pub order_id: String,
    /// Minor currency units (paise for INR).
    pub amount: i64,
    pub currency: String,
    pub method: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub captured_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureRejected {
    #[error("payment {0} has no order id")]
    MissingOrder(String),

    #[error("payment {payment_id} is {status}, not captured")]
    NotCaptured { payment_id: String, status: String },

    #[error("payment {0} has a non-positive amount")]
    InvalidAmount(String),
}

impl CapturedPayment {
    pub fn from_entity(entity: PaymentEntity, captured_at: i64) -> Result<Self, CaptureRejected> {
        if entity.status != "captured" {
            return Err(CaptureRejected::NotCaptured {
                payment_id: entity.id,
                status: entity.status,
            });
        }
        if entity.amount <= 0 {
            return Err(CaptureRejected::InvalidAmount(entity.id));
        }
        let Some(order_id) = entity.order_id.filter(|id| !id.is_empty()) else {
            return Err(CaptureRejected::MissingOrder(entity.id));
        };
        Ok(Self {
            payment_id: entity.id,
            order_id,
            amount: entity.amount,
            currency: entity.currency,
            method: entity.method,
            email: entity.email,
            contact: entity.contact,
            captured_at,
        })
    }
}
