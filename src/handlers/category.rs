use axum::Json;
use axum::extract::State;
use sea_orm::EntityTrait;
use tracing::instrument;

use crate::entity::blog_category;
use crate::error::AppError;
use crate::models::blog::CategoryResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/blog_categories",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List all blog categories",
    responses((status = 200, description = "Category list", body = [CategoryResponse])),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = blog_category::Entity::find().all(&state.db).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}
