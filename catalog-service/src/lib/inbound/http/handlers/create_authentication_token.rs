use auth::TokenScope;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::token::models::AuthenticateCommand;
use crate::domain::token::models::IssuedToken;
use crate::domain::token::ports::TokenServicePort;
use crate::inbound::http::router::AppState;

/// Exchange an email and password for an authentication token.
pub async fn create_authentication_token(
    State(state): State<AppState>,
    body: Result<Json<CreateAuthenticationTokenRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateAuthenticationTokenResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .token_service
        .create_authentication_token(AuthenticateCommand {
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|token| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CreateAuthenticationTokenResponseData {
                    authentication_token: token.into(),
                },
            )
        })
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAuthenticationTokenRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAuthenticationTokenResponseData {
    pub authentication_token: TokenData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub token: String,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

impl From<IssuedToken> for TokenData {
    fn from(token: IssuedToken) -> Self {
        Self {
            token: token.plaintext,
            expiry: token.expiry,
            scope: token.scope,
        }
    }
}
