use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contact-form submission ("glform" in the original schema).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "glform")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub request_type_id: i32,
    #[sea_orm(belongs_to, from = "request_type_id", to = "id")]
    pub request_type: HasOne<super::request_type::Entity>,

    pub email: String,
    pub phno: String,
    pub whats_app_number: Option<String>,
    pub company_name: String,
    pub company_site: String,
    #[sea_orm(column_type = "Text")]
    pub message: Option<String>,
    pub name: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
