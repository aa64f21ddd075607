use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use glsite_server::entity::{blog, blog_category};
use glsite_server::services::blog::{BlogChanges, BlogService, NewBlog};

/// In-memory SQLite stand-in for the relational store, with the schema
/// synchronized from the entity registry exactly as `init_db` does it.
async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    // A single connection keeps every statement on the same in-memory
    // database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect sqlite");
    db.get_schema_registry("glsite_server::entity::*")
        .sync(&db)
        .await
        .expect("sync schema");
    db
}

async fn seed_category(db: &DatabaseConnection, name: &str) -> i32 {
    blog_category::ActiveModel {
        category_name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
    .id
}

fn new_blog(category_id: i32, title: &str, image: Option<&str>) -> NewBlog {
    NewBlog {
        category_id,
        title: title.to_string(),
        content: "content".to_string(),
        conclusion: None,
        image: image.map(Into::into),
    }
}

fn changes(category_id: i32, title: &str, new_image: Option<&str>) -> BlogChanges {
    BlogChanges {
        category_id,
        title: title.to_string(),
        content: "updated content".to_string(),
        conclusion: Some("wrap-up".to_string()),
        new_image: new_image.map(Into::into),
    }
}

#[tokio::test]
async fn created_blog_is_an_imageless_draft() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    service.create(new_blog(category, "T", None)).await.unwrap();

    let all = service.all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].publish);
    assert_eq!(all[0].image, None);
    assert_eq!(all[0].title, "T");

    // Drafts are invisible to the public queries but not to the editorial
    // ones.
    assert!(service.published().await.unwrap().is_empty());
    assert!(service.published_by_id(all[0].id).await.unwrap().is_none());
    assert!(service.by_id(all[0].id).await.unwrap().is_some());
}

#[tokio::test]
async fn toggle_publish_twice_restores_the_draft() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    service.create(new_blog(category, "T", None)).await.unwrap();
    let id = service.all().await.unwrap()[0].id;

    assert_eq!(service.toggle_publish(id).await.unwrap(), Some(true));
    assert_eq!(service.published().await.unwrap().len(), 1);
    assert!(service.published_by_id(id).await.unwrap().is_some());

    assert_eq!(service.toggle_publish(id).await.unwrap(), Some(false));
    assert!(service.published().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggle_publish_on_missing_blog_is_none() {
    let db = setup_db().await;
    seed_category(&db, "IT").await;

    assert_eq!(BlogService::new(&db).toggle_publish(999).await.unwrap(), None);
}

#[tokio::test]
async fn update_without_new_image_preserves_the_stored_reference() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    service
        .create(new_blog(category, "T", Some("/uploads/image-1-1.png")))
        .await
        .unwrap();
    let id = service.all().await.unwrap()[0].id;

    assert!(service.update(id, changes(category, "T2", None)).await.unwrap());

    let model = service.by_id(id).await.unwrap().unwrap();
    assert_eq!(model.title, "T2");
    assert_eq!(model.content, "updated content");
    assert_eq!(model.image.as_deref(), Some("/uploads/image-1-1.png"));
}

#[tokio::test]
async fn update_with_new_image_replaces_the_reference() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    service
        .create(new_blog(category, "T", Some("/uploads/image-1-1.png")))
        .await
        .unwrap();
    let id = service.all().await.unwrap()[0].id;

    assert!(
        service
            .update(id, changes(category, "T", Some("/uploads/image-2-2.png")))
            .await
            .unwrap()
    );

    let model = service.by_id(id).await.unwrap().unwrap();
    assert_eq!(model.image.as_deref(), Some("/uploads/image-2-2.png"));
}

#[tokio::test]
async fn update_and_delete_report_missing_rows() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    assert!(!service.update(42, changes(category, "T", None)).await.unwrap());
    assert!(!service.delete(42).await.unwrap());
}

#[tokio::test]
async fn delete_removes_the_row() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    service.create(new_blog(category, "T", None)).await.unwrap();
    let id = service.all().await.unwrap()[0].id;

    assert!(service.delete(id).await.unwrap());
    assert!(service.by_id(id).await.unwrap().is_none());
    assert!(!service.delete(id).await.unwrap());
}

#[tokio::test]
async fn related_excludes_the_post_itself_and_drafts() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let other = seed_category(&db, "SAP").await;
    let service = BlogService::new(&db);

    for title in ["a", "b", "c"] {
        service.create(new_blog(category, title, None)).await.unwrap();
    }
    service.create(new_blog(other, "d", None)).await.unwrap();

    let id_of = |models: &[blog::Model], title: &str| {
        models.iter().find(|m| m.title == title).unwrap().id
    };
    let all = service.all().await.unwrap();

    // Publish everything except "a", which stays a draft in the same
    // category.
    for title in ["b", "c", "d"] {
        service.toggle_publish(id_of(&all, title)).await.unwrap();
    }

    let anchor = id_of(&all, "b");
    let related = service.related(category, anchor).await.unwrap();

    // "a" is a draft, "d" is another category, "b" is the anchor itself.
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, id_of(&all, "c"));
    assert!(related[0].publish);
}

#[tokio::test]
async fn latest_three_caps_the_landing_page_list() {
    let db = setup_db().await;
    let category = seed_category(&db, "IT").await;
    let service = BlogService::new(&db);

    for title in ["a", "b", "c", "d"] {
        service.create(new_blog(category, title, None)).await.unwrap();
    }
    for model in service.all().await.unwrap() {
        service.toggle_publish(model.id).await.unwrap();
    }

    let latest = service.latest_three().await.unwrap();
    assert_eq!(latest.len(), 3);
    for (_, cat) in &latest {
        assert_eq!(cat.as_ref().map(|c| c.category_name.as_str()), Some("IT"));
    }
}
