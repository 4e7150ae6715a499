use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::modules::payments::use_cases::capture_payment::inbound::http as capture_http;
use crate::modules::payments::use_cases::get_payment::inbound::graphql::GREETING;
use crate::modules::uploads::use_cases::upload_image::inbound::http as upload_http;
use crate::shell::graphql::{self, GRAPHQL_PATH};
use crate::shell::state::AppState;

pub const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub async fn greeting() -> &'static str {
    GREETING
}

pub fn router(state: AppState, frontend_origin: HeaderValue) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route(
            GRAPHQL_PATH,
            get(graphql::execute_get).post(graphql::execute),
        )
        .route("/webhook/capture", post(capture_http::handle))
        .route(
            "/cloudinary/upload/{event_name}",
            post(upload_http::event_image),
        )
        .route("/easter-egg/upload", post(upload_http::easter_egg))
        .route("/id/upload", post(upload_http::id_card))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors(frontend_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Grants only the configured front-end origin. Other origins get no CORS headers.
pub fn cors(frontend_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([frontend_origin]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}
