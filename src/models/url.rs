use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddUrlRequest {
    pub url: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AddUrlResponse {
    #[schema(example = "URL inserted successfully")]
    pub message: String,
    /// Generated id of the inserted row.
    pub id: i32,
}
