use async_graphql::{ComplexObject, Context, Object, Result as GqlResult, SimpleObject};
use std::sync::Arc;

use crate::modules::payments::core::captured_payment::CapturedPayment;
use crate::modules::payments::use_cases::get_payment::queries_port::PaymentQueries;
use crate::shared::core::request_context::RequestContext;

pub const GREETING: &str = "Hello Incridea";
const DEFAULT_PAYMENTS_LIMIT: i32 = 20;
const MAX_PAYMENTS_LIMIT: i32 = 100;

/// Schema-wide data for the payment resolvers.
#[derive(Clone)]
pub struct PaymentsData {
    pub queries: Arc<dyn PaymentQueries + Send + Sync>,
    pub admin_token: Option<String>,
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "Payment", complex)]
pub struct GqlPayment {
    pub payment_id: String,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub method: Option<String>,
    #[graphql(skip)]
    pub email: Option<String>,
    pub captured_at: i64,
}

#[ComplexObject]
impl GqlPayment {
    /// Payer email. Requires the admin bearer token.
    async fn email(&self, context: &Context<'_>) -> GqlResult<Option<String>> {
        require_admin(context)?;
        Ok(self.email.clone())
    }
}

impl From<CapturedPayment> for GqlPayment {
    fn from(p: CapturedPayment) -> Self {
        Self {
            payment_id: p.payment_id,
            order_id: p.order_id,
            amount: p.amount,
            currency: p.currency,
            method: p.method,
            email: p.email,
            captured_at: p.captured_at,
        }
    }
}

fn require_admin(context: &Context<'_>) -> GqlResult<()> {
    let data = context.data_unchecked::<PaymentsData>();
    let caller = context.data_opt::<RequestContext>();
    let authorized = match (data.admin_token.as_deref(), caller) {
        (Some(expected), Some(request)) => request.bearer_matches(expected),
        _ => false,
    };
    if !authorized {
        return Err(async_graphql::Error::new("Unauthorized"));
    }
    Ok(())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn greeting(&self) -> &'static str {
        GREETING
    }

    async fn payment(
        &self,
        context: &Context<'_>,
        order_id: String,
    ) -> GqlResult<Option<GqlPayment>> {
        let data = context.data_unchecked::<PaymentsData>();
        let payment = data.queries.find_by_order_id(&order_id).await?;
        Ok(payment.map(Into::into))
    }

    /// Most recent captures. Requires the admin bearer token.
    async fn payments(
        &self,
        context: &Context<'_>,
        #[graphql(default = 20)] limit: i32,
    ) -> GqlResult<Vec<GqlPayment>> {
        require_admin(context)?;
        let data = context.data_unchecked::<PaymentsData>();
        let limit = if limit <= 0 {
            DEFAULT_PAYMENTS_LIMIT
        } else {
            limit.min(MAX_PAYMENTS_LIMIT)
        };
        let list = data.queries.list_recent(limit as u64).await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}
