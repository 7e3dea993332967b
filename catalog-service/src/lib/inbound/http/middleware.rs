use auth::TokenScope;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::identity::Identity;
use crate::domain::token::errors::TokenError;
use crate::inbound::http::router::AppState;

/// Resolves the caller's [`Identity`] from the `Authorization` header and
/// stores it in the request extensions.
///
/// A request without the header continues as [`Identity::Anonymous`]. A
/// malformed header or a token that does not resolve ends the request with
/// `401`; no handler runs.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let resolved = match bearer_token(req.headers()) {
        Ok(token) => resolve_identity(&state, token.map(str::to_owned)).await,
        Err(err) => Err(err),
    };

    let mut response = match resolved {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    };

    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Authorization"));

    response
}

/// Rejects anonymous callers with `401` before the handler runs.
pub async fn require_authenticated(req: Request, next: Next) -> Response {
    let anonymous = req
        .extensions()
        .get::<Identity>()
        .map_or(true, Identity::is_anonymous);

    if anonymous {
        return ApiError::AuthenticationRequired.into_response();
    }

    next.run(req).await
}

async fn resolve_identity(state: &AppState, token: Option<String>) -> Result<Identity, ApiError> {
    let Some(token) = token else {
        return Ok(Identity::Anonymous);
    };

    match state
        .token_service
        .validate(&token, TokenScope::Authentication)
        .await
    {
        Ok(user) => Ok(Identity::Authenticated(user)),
        Err(TokenError::InvalidCredentials) => {
            tracing::debug!("Bearer token rejected");
            Err(ApiError::InvalidCredentials)
        }
        Err(err) => Err(ApiError::from(err)),
    }
}

/// `Ok(None)` when no header is present.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| ApiError::InvalidAuthenticationHeader)?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(Some(token)),
        _ => Err(ApiError::InvalidAuthenticationHeader),
    }
}
