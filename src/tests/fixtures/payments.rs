use serde_json::{Value, json};

use crate::modules::payments::core::captured_payment::CapturedPayment;
use crate::modules::payments::core::signature;

pub const WEBHOOK_SECRET: &str = "whsec_fixed_0001";

pub fn sign_body(body: &[u8]) -> String {
    signature::sign(WEBHOOK_SECRET.as_bytes(), body).expect("fixture secret keys the mac")
}

pub struct CapturedPaymentBuilder {
    payment: CapturedPayment,
}

impl CapturedPaymentBuilder {
    pub fn new() -> Self {
        Self {
            payment: CapturedPayment {
                payment_id: "pay_fixed_0001".into(),
                order_id: "order_fixed_0001".into(),
                amount: 25_000,
                currency: "INR".into(),
                method: Some("upi".into()),
                email: Some("participant@example.com".into()),
                contact: Some("+919900000000".into()),
                captured_at: 1_700_000_000_000,
            },
        }
    }

    pub fn payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment.payment_id = payment_id.into();
        self
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.payment.order_id = order_id.into();
        self
    }

    pub fn captured_at(mut self, captured_at: i64) -> Self {
        self.payment.captured_at = captured_at;
        self
    }

    pub fn build(self) -> CapturedPayment {
        self.payment
    }
}

/// Raw webhook body as the payment provider sends it.
pub struct PaymentWebhookBuilder {
    event: String,
    payment_id: String,
    order_id: Option<String>,
    amount: i64,
    status: String,
    created_at: Option<i64>,
}

impl PaymentWebhookBuilder {
    pub fn new() -> Self {
        Self {
            event: "payment.captured".into(),
            payment_id: "pay_fixed_0001".into(),
            order_id: Some("order_fixed_0001".into()),
            amount: 25_000,
            status: "captured".into(),
            created_at: Some(1_700_000_000),
        }
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    pub fn payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = payment_id.into();
        self
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn created_at(mut self, seconds: i64) -> Self {
        self.created_at = Some(seconds);
        self
    }

    pub fn without_created_at(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = json!({
            "entity": "event",
            "event": self.event,
            "contains": ["payment"],
            "payload": {
                "payment": {
                    "entity": {
                        "id": self.payment_id,
                        "entity": "payment",
                        "order_id": self.order_id,
                        "amount": self.amount,
                        "currency": "INR",
                        "status": self.status,
                        "method": "upi",
                        "email": "participant@example.com",
                        "contact": "+919900000000"
                    }
                }
            }
        });
        if let (Some(created_at), Value::Object(map)) = (self.created_at, &mut body) {
            map.insert("created_at".into(), json!(created_at));
        }
        serde_json::to_vec(&body).expect("fixture body serializes")
    }
}
