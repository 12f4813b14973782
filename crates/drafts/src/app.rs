use axum::{
    body::Body,
    http::{header, HeaderName, Method, Request, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    context::{OWNER_HEADER, REQUEST_ID_HEADER},
    handlers::{
        drafts::{
            create_draft, delete_draft, dump_drafts, list_drafts, next_draft, outbox_drafts,
            update_draft,
        },
        health::livez,
        rules::{create_rule, delete_rule, list_rules, update_rule},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(OWNER_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    let mut routes = Router::new()
        .route("/rules", get(list_rules).post(create_rule))
        .route("/rules/{timestamp}", put(update_rule).delete(delete_rule))
        .route("/drafts/next", get(next_draft))
        .route("/drafts/outbox", get(outbox_drafts))
        .route("/drafts/dump", post(dump_drafts));

    if state.config.expose_draft_routes {
        routes = routes
            .route("/drafts", get(list_drafts).post(create_draft))
            .route("/drafts/{timestamp}", put(update_draft).delete(delete_draft));
    }

    routes
        .route("/livez", get(livez))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    owner = tracing::field::Empty,
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .with_state(state)
}
