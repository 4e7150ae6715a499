use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::modules::payments::use_cases::capture_payment::inbound::http::SIGNATURE_HEADER;
use crate::modules::payments::use_cases::get_payment::queries_port::PaymentQueries;
use crate::tests::fixtures::app::{ADMIN_TOKEN, TestApp};
use crate::tests::fixtures::payments::{PaymentWebhookBuilder, sign_body};

async fn deliver(router: Router, body: Vec<u8>, signature: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post("/webhook/capture")
                .header(header::CONTENT_TYPE, "application/json")
                .header(SIGNATURE_HEADER, signature)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn query(router: Router, query: &str, bearer: Option<&str>) -> Value {
    let mut request = Request::post("/graphql").header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = router
        .oneshot(
            request
                .body(Body::from(json!({ "query": query }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn records_a_capture_once_and_serves_it_over_graphql() {
    let app = TestApp::new().build();
    let body = PaymentWebhookBuilder::new().build();
    let signature = sign_body(&body);

    let (first, json) = deliver(app.router(), body.clone(), &signature).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(json["status"], "captured");

    let (second, json) = deliver(app.router(), body, &signature).await;
    assert_eq!(second, StatusCode::OK);
    assert_eq!(json["status"], "duplicate");
    assert_eq!(app.payments.list_recent(10).await.unwrap().len(), 1);

    let found = query(
        app.router(),
        r#"{ payment(orderId: "order_fixed_0001") { paymentId amount currency capturedAt } }"#,
        None,
    )
    .await;
    assert_eq!(found["data"]["payment"]["paymentId"], "pay_fixed_0001");
    assert_eq!(found["data"]["payment"]["amount"], 25_000);
    assert_eq!(found["data"]["payment"]["capturedAt"], 1_700_000_000_000i64);
}

#[tokio::test]
async fn lists_payments_only_for_the_admin_bearer() {
    let app = TestApp::new().build();
    for id in ["pay_a", "pay_b"] {
        let body = PaymentWebhookBuilder::new()
            .payment_id(id)
            .order_id(format!("order_{id}"))
            .build();
        let signature = sign_body(&body);
        deliver(app.router(), body, &signature).await;
    }

    let list = "{ payments { paymentId } }";
    let listed = query(app.router(), list, Some(ADMIN_TOKEN)).await;
    assert_eq!(listed["data"]["payments"].as_array().unwrap().len(), 2);

    let refused = query(app.router(), list, Some("guess")).await;
    assert_eq!(refused["errors"][0]["message"], "Unauthorized");
}

#[tokio::test]
async fn refuses_a_tampered_body() {
    let app = TestApp::new().build();
    let signature = sign_body(&PaymentWebhookBuilder::new().build());
    let tampered = PaymentWebhookBuilder::new().order_id("order_other").build();

    let (status, json) = deliver(app.router(), tampered, &signature).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "webhook signature mismatch");
    assert!(app.payments.list_recent(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn refuses_a_capture_that_is_not_in_captured_state() {
    let app = TestApp::new().build();
    let body = PaymentWebhookBuilder::new().status("failed").build();
    let signature = sign_body(&body);

    let (status, _) = deliver(app.router(), body, &signature).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
