use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_authentication_token::create_authentication_token;
use super::handlers::get_current_user::get_current_user;
use super::handlers::get_user::get_user;
use super::handlers::healthcheck::healthcheck;
use super::handlers::healthcheck::SystemInfo;
use super::handlers::method_not_allowed;
use super::handlers::not_found;
use super::handlers::register_user::register_user;
use super::handlers::ApiError;
use super::middleware::authenticate;
use super::middleware::require_authenticated;
use crate::domain::token::ports::TokenServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub token_service: Arc<dyn TokenServicePort>,
    pub system_info: SystemInfo,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    token_service: Arc<dyn TokenServicePort>,
    system_info: SystemInfo,
) -> Router {
    let state = AppState {
        user_service,
        token_service,
        system_info,
    };

    let public_routes = Router::new()
        .route("/v1/healthcheck", get(healthcheck).fallback(method_not_allowed))
        .route("/v1/users", post(register_user).fallback(method_not_allowed))
        .route(
            "/v1/tokens/authentication",
            post(create_authentication_token).fallback(method_not_allowed),
        );

    let protected_routes = Router::new()
        .route("/v1/users/me", get(get_current_user).fallback(method_not_allowed))
        .route("/v1/users/:user_id", get(get_user).fallback(method_not_allowed))
        .route_layer(middleware::from_fn(require_authenticated));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    ApiError::InternalServerError("handler panicked".to_string()).into_response()
}
