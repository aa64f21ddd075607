use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub category_id: i32,
    #[sea_orm(belongs_to, from = "category_id", to = "id")]
    pub category: HasOne<super::blog_category::Entity>,

    pub title: String,

    /// Relative path under the upload root (e.g. "/uploads/image-....png").
    /// NULL when the post has no image. Always a path that passed the
    /// upload filter at write time.
    pub image: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text")]
    pub conclusion: Option<String>,

    /// Draft/published flag. New posts start as drafts.
    pub publish: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
