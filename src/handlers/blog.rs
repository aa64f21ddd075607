use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::blog::{BlogResponse, LatestBlogResponse, TogglePublishResponse};
use crate::models::shared::MessageResponse;
use crate::services::blog::{BlogChanges, BlogService, NewBlog};
use crate::state::AppState;
use crate::upload::filter;
use crate::upload::store::UploadStore;

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(64 * 1024 * 1024) // 64 MB
}

/// Fields collected from a blog multipart form. `image` holds the stored
/// relative path once the upload has been filtered and written.
struct BlogForm {
    category_id: Option<i32>,
    title: Option<String>,
    content: Option<String>,
    conclusion: Option<String>,
    image: Option<String>,
}

/// Drains a blog multipart form. The image field is gated by the upload
/// filter before any bytes reach disk; text fields are collected as-is.
/// `category_key` differs between the create and update forms.
async fn read_blog_form(
    state: &AppState,
    mut multipart: Multipart,
    category_key: &str,
) -> Result<BlogForm, AppError> {
    let mut form = BlogForm {
        category_id: None,
        title: None,
        content: None,
        conclusion: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("image") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| {
                        AppError::Validation("Image field must have a filename".into())
                    })?
                    .to_string();
                let mime_type = field.content_type().unwrap_or_default().to_string();

                filter::check_upload(&filename, &mime_type)
                    .map_err(|r| AppError::RejectedFileType(r.message()))?;

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;

                form.image = Some(state.uploads.save("image", &filename, &bytes).await?);
            }
            Some(key) if key == category_key => {
                let text = read_text(field, category_key).await?;
                let parsed = text.trim().parse::<i32>().map_err(|_| {
                    AppError::Validation(format!("'{category_key}' must be an integer"))
                })?;
                form.category_id = Some(parsed);
            }
            Some("title") => form.title = Some(read_text(field, "title").await?),
            Some("content") => form.content = Some(read_text(field, "content").await?),
            Some("conclusion") => {
                let text = read_text(field, "conclusion").await?;
                if !text.trim().is_empty() {
                    form.conclusion = Some(text);
                }
            }
            _ => {} // Ignore unknown fields.
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Missing '{name}' field")))
}

/// Unwraps the required form fields, discarding a freshly stored image when
/// the rest of the form turns out to be invalid.
async fn require_fields(
    state: &AppState,
    form: BlogForm,
    category_key: &str,
) -> Result<(i32, String, String, Option<String>, Option<String>), AppError> {
    let filled = (|| -> Result<(i32, String, String, Option<String>), AppError> {
        Ok((
            require(form.category_id, category_key)?,
            require(form.title, "title")?,
            require(form.content, "content")?,
            form.conclusion,
        ))
    })();

    match filled {
        Ok((category_id, title, content, conclusion)) => {
            Ok((category_id, title, content, conclusion, form.image))
        }
        Err(e) => {
            if let Some(path) = &form.image {
                discard_stored_image(&state.uploads, path).await;
            }
            Err(e)
        }
    }
}

async fn discard_stored_image(store: &UploadStore, path: &str) {
    if let Err(e) = store.remove(path).await {
        tracing::warn!("Failed to remove stored image {}: {}", path, e);
    }
}

#[utoipa::path(
    post,
    path = "/add-blog",
    tag = "Blogs",
    operation_id = "addBlog",
    summary = "Create a blog post",
    description = "Multipart form with `categoryId`, `title`, `content`, optional `conclusion` \
        and optional `image` file. Accepted images are written under the upload root before \
        the row is inserted; new posts start as drafts.",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Blog created", body = MessageResponse),
        (status = 400, description = "Validation or file-type error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn add_blog(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_blog_form(&state, multipart, "categoryId").await?;
    let (category_id, title, content, conclusion, image) =
        require_fields(&state, form, "categoryId").await?;

    BlogService::new(&state.db)
        .create(NewBlog {
            category_id,
            title,
            content,
            conclusion,
            image,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Blog added successfully!")),
    ))
}

#[utoipa::path(
    put,
    path = "/blogs/update/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog post",
    description = "Multipart form with `category_id`, `title`, `content`, optional `conclusion` \
        and optional `image`. All scalar fields are replaced; the stored image reference is \
        preserved unless a new file is uploaded, in which case the previous file is removed \
        after the row update succeeds.",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Blog updated", body = MessageResponse),
        (status = 400, description = "Validation or file-type error", body = ErrorBody),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(id))]
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let service = BlogService::new(&state.db);

    let existing = service
        .by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    let form = read_blog_form(&state, multipart, "category_id").await?;
    let (category_id, title, content, conclusion, new_image) =
        require_fields(&state, form, "category_id").await?;

    let changes = BlogChanges {
        category_id,
        title,
        content,
        conclusion,
        new_image: new_image.clone(),
    };

    let updated = service.update(id, changes).await?;
    if !updated {
        // Row vanished between the lookup and the update; don't leave the
        // freshly stored file behind.
        if let Some(path) = &new_image {
            discard_stored_image(&state.uploads, path).await;
        }
        return Err(AppError::NotFound("Blog not found".into()));
    }

    if new_image.is_some()
        && let Some(old) = &existing.image
    {
        discard_stored_image(&state.uploads, old).await;
    }

    Ok(Json(MessageResponse::new("Blog updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/blogs/delete/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog post",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = MessageResponse),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = BlogService::new(&state.db);

    let existing = service
        .by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    let deleted = service.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Blog not found".into()));
    }

    if let Some(image) = &existing.image {
        discard_stored_image(&state.uploads, image).await;
    }

    Ok(Json(MessageResponse::new("Blog deleted successfully")))
}

#[utoipa::path(
    put,
    path = "/blogs/togglePublish/{id}",
    tag = "Blogs",
    operation_id = "togglePublish",
    summary = "Flip a post's publish flag",
    description = "Atomically negates the publish flag and returns its new value.",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Flag flipped", body = TogglePublishResponse),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn toggle_publish(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TogglePublishResponse>, AppError> {
    let publish = BlogService::new(&state.db)
        .toggle_publish(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    Ok(Json(TogglePublishResponse {
        success: true,
        publish,
    }))
}

#[utoipa::path(
    get,
    path = "/blogs",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List published posts, newest first",
    responses((status = 200, description = "Published posts", body = [BlogResponse])),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = BlogService::new(&state.db).published().await?;
    Ok(Json(to_responses(&state, blogs)))
}

#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a published post by id",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 404, description = "Blog not found or unpublished", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    let model = BlogService::new(&state.db)
        .published_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    Ok(Json(BlogResponse::from_model(
        &state.config.uploads.base_url,
        model,
    )))
}

#[utoipa::path(
    get,
    path = "/blogs/category/{category_id}",
    tag = "Blogs",
    operation_id = "listBlogsByCategory",
    summary = "List published posts in a category",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Published posts", body = [BlogResponse])),
)]
#[instrument(skip(state), fields(category_id))]
pub async fn blogs_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = BlogService::new(&state.db)
        .published_by_category(category_id)
        .await?;
    Ok(Json(to_responses(&state, blogs)))
}

#[utoipa::path(
    get,
    path = "/relatedBlogs/{category_id}/{id}",
    tag = "Blogs",
    operation_id = "relatedBlogs",
    summary = "Published posts sharing a category, excluding the post itself",
    params(
        ("category_id" = i32, Path, description = "Category ID"),
        ("id" = i32, Path, description = "Blog ID to exclude"),
    ),
    responses((status = 200, description = "Related posts", body = [BlogResponse])),
)]
#[instrument(skip(state), fields(category_id, id))]
pub async fn related_blogs(
    State(state): State<AppState>,
    Path((category_id, id)): Path<(i32, i32)>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = BlogService::new(&state.db).related(category_id, id).await?;
    Ok(Json(to_responses(&state, blogs)))
}

#[utoipa::path(
    get,
    path = "/update/getblogs/{id}",
    tag = "Blogs",
    operation_id = "getBlogForUpdate",
    summary = "Get a post by id regardless of publish state",
    description = "Editorial view used to prefill the update form.",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_blog_for_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogResponse>, AppError> {
    let model = BlogService::new(&state.db)
        .by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    Ok(Json(BlogResponse::from_model(
        &state.config.uploads.base_url,
        model,
    )))
}

#[utoipa::path(
    get,
    path = "/content/blogs",
    tag = "Blogs",
    operation_id = "listContentBlogs",
    summary = "List every post, drafts included",
    description = "Editorial view for content writers.",
    responses((status = 200, description = "All posts", body = [BlogResponse])),
)]
#[instrument(skip(state))]
pub async fn content_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = BlogService::new(&state.db).all().await?;
    Ok(Json(to_responses(&state, blogs)))
}

#[utoipa::path(
    get,
    path = "/blogs/content/category/{category_id}",
    tag = "Blogs",
    operation_id = "listContentBlogsByCategory",
    summary = "List every post in a category, drafts included",
    params(("category_id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "All posts in category", body = [BlogResponse])),
)]
#[instrument(skip(state), fields(category_id))]
pub async fn content_blogs_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = BlogService::new(&state.db).by_category(category_id).await?;
    Ok(Json(to_responses(&state, blogs)))
}

#[utoipa::path(
    get,
    path = "/latestThreeBlogs",
    tag = "Blogs",
    operation_id = "latestThreeBlogs",
    summary = "The three most recent published posts with category names",
    responses((status = 200, description = "Latest posts", body = [LatestBlogResponse])),
)]
#[instrument(skip(state))]
pub async fn latest_three_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatestBlogResponse>>, AppError> {
    let base_url = &state.config.uploads.base_url;
    let rows = BlogService::new(&state.db).latest_three().await?;

    Ok(Json(
        rows.into_iter()
            .map(|(blog, category)| LatestBlogResponse::from_model(base_url, blog, category))
            .collect(),
    ))
}

fn to_responses(state: &AppState, blogs: Vec<crate::entity::blog::Model>) -> Vec<BlogResponse> {
    let base_url = &state.config.uploads.base_url;
    blogs
        .into_iter()
        .map(|m| BlogResponse::from_model(base_url, m))
        .collect()
}
