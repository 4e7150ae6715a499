// GraphQL stage: query armor first, then schema execution with the per-request context.

use async_graphql::http::GraphiQLSource;
use async_graphql::{
    EmptyMutation, EmptySubscription, Request, Response, Schema, ServerError, Variables,
};
use async_graphql_axum::GraphQLResponse;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use crate::shared::core::request_context::RequestContext;
use crate::shell::state::AppState;

pub use crate::modules::payments::use_cases::get_payment::inbound::graphql::{
    PaymentsData, QueryRoot,
};

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub const GRAPHQL_PATH: &str = "/graphql";
const SUGGESTION_MARKER: &str = " Did you mean";
const HIDDEN_SUGGESTION: &str = " [Suggestion hidden]";
const MULTIPART_REFUSED: &str = "GraphQL multipart requests are not supported.";

pub fn build_schema(payments: PaymentsData) -> AppSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(payments)
        .finish()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetParams {
    pub query: Option<String>,
    pub operation_name: Option<String>,
    pub variables: Option<String>,
}

/// JSON POST only. The body is read under the router's `DefaultBodyLimit`.
pub async fn execute(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    if is_multipart(&headers) {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, MULTIPART_REFUSED).into_response();
    }
    let request = match serde_json::from_slice::<Request>(&body) {
        Ok(request) => request,
        Err(e) => {
            let message = format!("Invalid GraphQL request body: {e}");
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };
    let response = run(&state, request, &headers).await;
    GraphQLResponse::from(response).into_response()
}

pub async fn execute_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GetParams>,
) -> axum::response::Response {
    let Some(query) = params.query.filter(|query| !query.trim().is_empty()) else {
        if state.runtime_mode.is_development() && accepts_html(&headers) {
            return graphiql().into_response();
        }
        return (StatusCode::BAD_REQUEST, "Must provide query string.").into_response();
    };

    let mut request = Request::new(query);
    if let Some(operation_name) = params.operation_name {
        request = request.operation_name(operation_name);
    }
    if let Some(raw) = params.variables {
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => request = request.variables(Variables::from_json(value)),
            Err(e) => {
                let message = format!("Variables are invalid JSON: {e}");
                return (StatusCode::BAD_REQUEST, message).into_response();
            }
        }
    }
    let response = run(&state, request, &headers).await;
    GraphQLResponse::from(response).into_response()
}

async fn run(state: &AppState, request: Request, headers: &HeaderMap) -> Response {
    if let Err(rejection) = state.armor.inspect(&request.query) {
        tracing::debug!(guard = rejection.guard(), error = %rejection, "graphql request refused");
        return Response::from_errors(vec![rejection.into()]);
    }
    let request = request.data(RequestContext::from_headers(headers));
    let mut response = state.schema.execute(request).await;
    mask_suggestions(&mut response.errors);
    response
}

/// Replaces any `Did you mean ...?` hint so error messages never reveal schema field names.
pub fn mask_suggestions(errors: &mut [ServerError]) {
    for error in errors {
        if let Some(at) = error.message.find(SUGGESTION_MARKER) {
            error.message.truncate(at);
            error.message.push_str(HIDDEN_SUGGESTION);
        }
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/"))
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

pub fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
