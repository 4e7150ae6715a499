use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;

use crate::modules::payments::use_cases::capture_payment::handler::{
    CaptureError, CaptureOutcome,
};
use crate::shell::state::AppState;

pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match state
        .capture_handler
        .handle(signature, &body, Utc::now().timestamp_millis())
        .await
    {
        Ok(CaptureOutcome::Captured(payment)) => {
            tracing::info!(
                payment_id = %payment.payment_id,
                order_id = %payment.order_id,
                amount = payment.amount,
                "payment captured"
            );
            (StatusCode::OK, Json(json!({ "status": "captured" }))).into_response()
        }
        Ok(CaptureOutcome::Duplicate { payment_id }) => {
            tracing::debug!(payment_id = %payment_id, "payment capture redelivered");
            (StatusCode::OK, Json(json!({ "status": "duplicate" }))).into_response()
        }
        Ok(CaptureOutcome::Ignored { event }) => {
            tracing::debug!(event = %event, "webhook event ignored");
            (StatusCode::OK, Json(json!({ "status": "ignored" }))).into_response()
        }
        Err(CaptureError::Ledger(e)) => {
            tracing::error!(error = %e, "failed to record captured payment");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "webhook refused");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
