use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::tests::fixtures::app::{FRONTEND_ORIGIN, TestApp};
use crate::tests::fixtures::uploads::{MultipartBody, PNG_BYTES};

#[tokio::test]
async fn uploads_through_every_route_of_the_full_router() {
    let app = TestApp::new().build();
    let routes = [
        ("/cloudinary/upload/robowars", "events/robowars"),
        ("/easter-egg/upload", "easter-egg"),
        ("/id/upload", "id"),
    ];

    for (uri, folder) in routes {
        let body = MultipartBody::new().file("image", "shot.png", "image/png", PNG_BYTES);
        let response = app
            .router()
            .oneshot(
                Request::post(uri)
                    .header(header::ORIGIN, FRONTEND_ORIGIN)
                    .header(header::CONTENT_TYPE, body.content_type())
                    .body(Body::from(body.build()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(
            response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            json["public_id"]
                .as_str()
                .unwrap()
                .starts_with(&format!("{folder}/"))
        );
    }

    assert_eq!(app.media.uploads().await.len(), 3);
}

#[tokio::test]
async fn refuses_bodies_over_the_router_limit() {
    let oversized = vec![0u8; 9 * 1024 * 1024];
    let body = MultipartBody::new().file("image", "huge.png", "image/png", &oversized);
    let response = TestApp::new()
        .router()
        .oneshot(
            Request::post("/easter-egg/upload")
                .header(header::CONTENT_TYPE, body.content_type())
                .body(Body::from(body.build()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
