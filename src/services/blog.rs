use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::{blog, blog_category};

/// Fields for a new blog post. The image, when present, is the relative
/// path returned by the upload store.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub category_id: i32,
    pub title: String,
    pub content: String,
    pub conclusion: Option<String>,
    pub image: Option<String>,
}

/// Fields for a full-row update. Scalar fields are written unconditionally;
/// the image column is touched only when `new_image` is present, so an
/// update without a fresh upload preserves the stored reference.
#[derive(Debug, Clone)]
pub struct BlogChanges {
    pub category_id: i32,
    pub title: String,
    pub content: String,
    pub conclusion: Option<String>,
    pub new_image: Option<String>,
}

/// Blog-table operations over any borrowed connection, so handlers can pass
/// the pool and tests can pass a mock or an in-memory database.
pub struct BlogService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> BlogService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Inserts a new post. Posts always start unpublished; the caller gets
    /// no generated id back.
    pub async fn create(&self, input: NewBlog) -> Result<(), DbErr> {
        blog::ActiveModel {
            category_id: Set(input.category_id),
            title: Set(input.title),
            content: Set(input.content),
            conclusion: Set(input.conclusion),
            image: Set(input.image),
            publish: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(())
    }

    /// Updates all scalar fields of a post; includes the image column in the
    /// statement only when a replacement was uploaded. Returns `false` when
    /// no row matched.
    pub async fn update(&self, id: i32, changes: BlogChanges) -> Result<bool, DbErr> {
        let mut update = blog::Entity::update_many()
            .col_expr(blog::Column::CategoryId, Expr::value(changes.category_id))
            .col_expr(blog::Column::Title, Expr::value(changes.title))
            .col_expr(blog::Column::Content, Expr::value(changes.content))
            .col_expr(blog::Column::Conclusion, Expr::value(changes.conclusion));

        if let Some(image) = changes.new_image {
            update = update.col_expr(blog::Column::Image, Expr::value(image));
        }

        let result = update
            .filter(blog::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a post. Returns `false` when no row matched.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = blog::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Flips the publish flag in a single atomic statement and returns the
    /// new value, or `None` when the post does not exist. A follow-up read
    /// fetches the flag; the flip itself cannot lose concurrent toggles.
    pub async fn toggle_publish(&self, id: i32) -> Result<Option<bool>, DbErr> {
        let result = blog::Entity::update_many()
            .col_expr(
                blog::Column::Publish,
                Expr::col(blog::Column::Publish).not(),
            )
            .filter(blog::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let model = blog::Entity::find_by_id(id).one(self.conn).await?;
        Ok(model.map(|m| m.publish))
    }

    /// All published posts, newest first.
    pub async fn published(&self) -> Result<Vec<blog::Model>, DbErr> {
        blog::Entity::find()
            .filter(blog::Column::Publish.eq(true))
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    /// A single published post.
    pub async fn published_by_id(&self, id: i32) -> Result<Option<blog::Model>, DbErr> {
        blog::Entity::find_by_id(id)
            .filter(blog::Column::Publish.eq(true))
            .one(self.conn)
            .await
    }

    /// Published posts in one category, newest first.
    pub async fn published_by_category(&self, category_id: i32) -> Result<Vec<blog::Model>, DbErr> {
        blog::Entity::find()
            .filter(blog::Column::CategoryId.eq(category_id))
            .filter(blog::Column::Publish.eq(true))
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    /// Published posts sharing a category, excluding the post itself.
    pub async fn related(&self, category_id: i32, exclude_id: i32) -> Result<Vec<blog::Model>, DbErr> {
        blog::Entity::find()
            .filter(blog::Column::CategoryId.eq(category_id))
            .filter(blog::Column::Id.ne(exclude_id))
            .filter(blog::Column::Publish.eq(true))
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    /// A single post regardless of publish state (editorial view).
    pub async fn by_id(&self, id: i32) -> Result<Option<blog::Model>, DbErr> {
        blog::Entity::find_by_id(id).one(self.conn).await
    }

    /// Every post, drafts included, newest first (editorial view).
    pub async fn all(&self) -> Result<Vec<blog::Model>, DbErr> {
        blog::Entity::find()
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    /// Every post in one category, drafts included (editorial view).
    pub async fn by_category(&self, category_id: i32) -> Result<Vec<blog::Model>, DbErr> {
        blog::Entity::find()
            .filter(blog::Column::CategoryId.eq(category_id))
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.conn)
            .await
    }

    /// The three most recent published posts with their category, for the
    /// landing page.
    pub async fn latest_three(
        &self,
    ) -> Result<Vec<(blog::Model, Option<blog_category::Model>)>, DbErr> {
        blog::Entity::find()
            .filter(blog::Column::Publish.eq(true))
            .order_by_desc(blog::Column::CreatedAt)
            .limit(3)
            .find_also_related(blog_category::Entity)
            .all(self.conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[tokio::test]
    async fn toggle_publish_returns_new_flag() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([[blog::Model {
                id: 7,
                category_id: 1,
                title: "T".into(),
                image: None,
                content: "c".into(),
                conclusion: None,
                publish: true,
                created_at: Utc::now(),
            }]])
            .into_connection();

        let flipped = BlogService::new(&db).toggle_publish(7).await.unwrap();
        assert_eq!(flipped, Some(true));
    }

    #[tokio::test]
    async fn toggle_publish_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let flipped = BlogService::new(&db).toggle_publish(99).await.unwrap();
        assert_eq!(flipped, None);
    }

    #[tokio::test]
    async fn update_statement_includes_image_column_only_when_supplied() {
        let changes = BlogChanges {
            category_id: 1,
            title: "T".into(),
            content: "c".into(),
            conclusion: None,
            new_image: None,
        };

        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        BlogService::new(&db)
            .update(1, changes.clone())
            .await
            .unwrap();
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("`image`"), "image set without upload: {log}");

        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        BlogService::new(&db)
            .update(
                1,
                BlogChanges {
                    new_image: Some("/uploads/image-1-2.png".into()),
                    ..changes
                },
            )
            .await
            .unwrap();
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("`image`"), "image not set with upload: {log}");
    }

    #[tokio::test]
    async fn delete_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        assert!(!BlogService::new(&db).delete(42).await.unwrap());
    }
}
