use axum::Json;
use axum::extract::State;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::instrument;

use crate::entity::login_user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::state::AppState;

/// Handle editorial login.
///
/// Deliberately a bare credential comparison against the `login` table,
/// matching the system this replaces. There is no session or token issued;
/// the frontend only consumes the user payload.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Check editorial credentials",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "Please provide both email and password.".into(),
        ));
    }

    let user = login_user::Entity::find()
        .filter(login_user::Column::Username.eq(payload.email.trim()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if user.password != payload.password {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user: user.into(),
    }))
}
