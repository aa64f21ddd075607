use serde::{Deserialize, Serialize};

use crate::entity::login_user;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// The frontend sends the username under this key.
    pub email: String,
    pub password: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: UserInfo,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<login_user::Model> for UserInfo {
    fn from(model: login_user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
        }
    }
}
