use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{form_submission, request_type};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SubmitFormRequest {
    pub request_type_id: i32,
    pub email: String,
    pub phno: String,
    pub whatsappnumber: Option<String>,
    pub company_name: String,
    pub company_site: String,
    pub message: Option<String>,
    pub username: Option<String>,
}

pub fn validate_submit_form(payload: &SubmitFormRequest) -> Result<(), AppError> {
    for (value, name) in [
        (&payload.email, "email"),
        (&payload.phno, "phno"),
        (&payload.company_name, "company_name"),
        (&payload.company_site, "company_site"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("Missing '{name}' field")));
        }
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FormSubmissionResponse {
    pub id: i32,
    pub request_type_id: i32,
    pub email: String,
    pub phno: String,
    pub whats_app_number: Option<String>,
    pub company_name: String,
    pub company_site: String,
    pub message: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<form_submission::Model> for FormSubmissionResponse {
    fn from(model: form_submission::Model) -> Self {
        Self {
            id: model.id,
            request_type_id: model.request_type_id,
            email: model.email,
            phno: model.phno,
            whats_app_number: model.whats_app_number,
            company_name: model.company_name,
            company_site: model.company_site,
            message: model.message,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RequestTypeResponse {
    pub id: i32,
    pub name: String,
}

impl From<request_type::Model> for RequestTypeResponse {
    fn from(model: request_type::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
