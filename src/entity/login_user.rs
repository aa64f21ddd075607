use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Editorial login credentials ("login" table). Passwords are stored and
/// compared as plain strings, matching the system this replaces.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "login")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
}

impl ActiveModelBehavior for ActiveModel {}
