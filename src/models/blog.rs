use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::{blog, blog_category};

/// Response DTO for a blog post. `blog_image` is derived at response time
/// from the configured public base URL and the stored relative path; it is
/// never persisted pre-joined.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub content: String,
    pub conclusion: Option<String>,
    pub publish: bool,
    /// Absolute image URL, absent when the post has no image.
    #[schema(example = "http://localhost:3000/uploads/image-1711034455123-488137561.png")]
    pub blog_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BlogResponse {
    pub fn from_model(base_url: &str, model: blog::Model) -> Self {
        let blog_image = image_url(base_url, model.image.as_deref());
        Self {
            id: model.id,
            category_id: model.category_id,
            title: model.title,
            content: model.content,
            conclusion: model.conclusion,
            publish: model.publish,
            blog_image,
            created_at: model.created_at,
        }
    }
}

/// Landing-page DTO: a published post plus its category name.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LatestBlogResponse {
    #[serde(flatten)]
    pub blog: BlogResponse,
    pub category_name: Option<String>,
}

impl LatestBlogResponse {
    pub fn from_model(
        base_url: &str,
        model: blog::Model,
        category: Option<blog_category::Model>,
    ) -> Self {
        Self {
            blog: BlogResponse::from_model(base_url, model),
            category_name: category.map(|c| c.category_name),
        }
    }
}

/// Result of flipping a post's publish flag.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TogglePublishResponse {
    pub success: bool,
    /// The flag's new value.
    pub publish: bool,
}

/// Response DTO for a blog category.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub category_name: String,
}

impl From<blog_category::Model> for CategoryResponse {
    fn from(model: blog_category::Model) -> Self {
        Self {
            id: model.id,
            category_name: model.category_name,
        }
    }
}

fn image_url(base_url: &str, image: Option<&str>) -> Option<String> {
    image.map(|path| format!("{base_url}{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(image: Option<&str>) -> blog::Model {
        blog::Model {
            id: 1,
            category_id: 2,
            title: "T".into(),
            image: image.map(Into::into),
            content: "c".into(),
            conclusion: None,
            publish: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn image_url_joins_base_and_relative_path() {
        let resp = BlogResponse::from_model("http://localhost:3000", model(Some("/uploads/a.png")));
        assert_eq!(
            resp.blog_image.as_deref(),
            Some("http://localhost:3000/uploads/a.png")
        );
    }

    #[test]
    fn missing_image_serializes_as_null() {
        let resp = BlogResponse::from_model("http://localhost:3000", model(None));
        let value = serde_json::to_value(&resp).unwrap();
        assert!(value["blog_image"].is_null());
    }
}
