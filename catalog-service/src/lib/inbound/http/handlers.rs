use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::token::errors::TokenError;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::validator::ValidationErrors;
use crate::user::errors::UserError;

pub mod create_authentication_token;
pub mod get_current_user;
pub mod get_user;
pub mod healthcheck;
pub mod register_user;

const INTERNAL_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Detail is logged server-side and never sent to the client.
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed,
    FailedValidation(ValidationErrors),
    InvalidCredentials,
    InvalidAuthenticationHeader,
    AuthenticationRequired,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidCredentials
            | ApiError::InvalidAuthenticationHeader
            | ApiError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let data = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ApiErrorData::new("internal_error", INTERNAL_ERROR_MESSAGE)
            }
            ApiError::BadRequest(msg) => ApiErrorData::new("bad_request", msg),
            ApiError::NotFound(msg) => ApiErrorData::new("not_found", msg),
            ApiError::MethodNotAllowed => ApiErrorData::new(
                "method_not_allowed",
                "the method is not supported for this resource",
            ),
            ApiError::FailedValidation(errors) => ApiErrorData {
                code: "failed_validation".to_string(),
                message: "the request contains invalid fields".to_string(),
                errors: Some(errors),
            },
            ApiError::InvalidCredentials => {
                ApiErrorData::new("invalid_credentials", "invalid authentication credentials")
            }
            ApiError::InvalidAuthenticationHeader => ApiErrorData::new(
                "invalid_authentication_header",
                "Authorization header must have the form: Bearer <token>",
            ),
            ApiError::AuthenticationRequired => ApiErrorData::new(
                "authentication_required",
                "you must be authenticated to access this resource",
            ),
        };

        let mut response = (status, Json(ApiResponseBody::new(status, data))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => ApiError::FailedValidation(errors),
            UserError::DuplicateEmail(_) => ApiError::FailedValidation(ValidationErrors::single(
                "email",
                crate::domain::user::validation::DUPLICATE_EMAIL_MESSAGE,
            )),
            UserError::NotFound(_) | UserError::InvalidUserId(_) => {
                ApiError::NotFound("the requested resource could not be found".to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Validation(errors) => ApiError::FailedValidation(errors),
            TokenError::InvalidCredentials => ApiError::InvalidCredentials,
            TokenError::Password(_) | TokenError::Generation(_) | TokenError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ApiErrorData {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            errors: None,
        }
    }
}

/// Public representation of a user. Credentials never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("the requested resource could not be found".to_string())
}

/// Fallback for a known path called with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
