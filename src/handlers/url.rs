use axum::Json;
use axum::extract::State;
use sea_orm::{EntityTrait, Set};
use tracing::instrument;

use crate::entity::seo_url;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::url::{AddUrlRequest, AddUrlResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/add-url",
    tag = "Urls",
    operation_id = "addUrl",
    summary = "Store an SEO URL",
    request_body = AddUrlRequest,
    responses(
        (status = 200, description = "URL stored", body = AddUrlResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn add_url(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddUrlRequest>,
) -> Result<Json<AddUrlResponse>, AppError> {
    if payload.url.trim().is_empty() {
        return Err(AppError::Validation("Missing 'url' field".into()));
    }

    let result = seo_url::Entity::insert(seo_url::ActiveModel {
        url: Set(payload.url),
        ..Default::default()
    })
    .exec(&state.db)
    .await?;

    Ok(Json(AddUrlResponse {
        message: "URL inserted successfully".into(),
        id: result.last_insert_id,
    }))
}
