use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::identity::Identity;

/// Return the user the bearer token resolved to.
pub async fn get_current_user(
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<GetCurrentUserResponseData>, ApiError> {
    let user = identity.user().ok_or(ApiError::AuthenticationRequired)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        GetCurrentUserResponseData { user: user.into() },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetCurrentUserResponseData {
    pub user: UserData,
}
