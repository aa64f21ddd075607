use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tracing::instrument;

use crate::entity::{form_submission, request_type};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::form::{
    FormSubmissionResponse, RequestTypeResponse, SubmitFormRequest, validate_submit_form,
};
use crate::models::shared::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/submit-form",
    tag = "Forms",
    operation_id = "submitForm",
    summary = "Store a contact-form submission",
    request_body = SubmitFormRequest,
    responses(
        (status = 200, description = "Form stored", body = MessageResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn submit_form(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitFormRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_submit_form(&payload)?;

    form_submission::ActiveModel {
        request_type_id: Set(payload.request_type_id),
        email: Set(payload.email),
        phno: Set(payload.phno),
        whats_app_number: Set(payload.whatsappnumber),
        company_name: Set(payload.company_name),
        company_site: Set(payload.company_site),
        message: Set(payload.message),
        name: Set(payload.username),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Form submitted successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/glform-data",
    tag = "Forms",
    operation_id = "listFormSubmissions",
    summary = "List all contact-form submissions",
    responses((status = 200, description = "Submissions", body = [FormSubmissionResponse])),
)]
#[instrument(skip(state))]
pub async fn list_form_submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<FormSubmissionResponse>>, AppError> {
    let rows = form_submission::Entity::find().all(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/request-types",
    tag = "Forms",
    operation_id = "listRequestTypes",
    summary = "List contact-form request types",
    responses((status = 200, description = "Request types", body = [RequestTypeResponse])),
)]
#[instrument(skip(state))]
pub async fn list_request_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestTypeResponse>>, AppError> {
    let rows = request_type::Entity::find().all(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
