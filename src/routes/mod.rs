use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// The full route surface. Paths are kept flat and verbatim from the
/// frontend contract (no version prefix).
pub fn api_routes() -> OpenApiRouter<AppState> {
    blog_routes()
        .merge(category_routes())
        .merge(form_routes())
        .merge(url_routes())
        .merge(auth_routes())
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::blog::add_blog))
        .routes(routes!(handlers::blog::list_blogs))
        .routes(routes!(handlers::blog::get_blog))
        .routes(routes!(handlers::blog::blogs_by_category))
        .routes(routes!(handlers::blog::related_blogs))
        .routes(routes!(handlers::blog::get_blog_for_update))
        .routes(routes!(handlers::blog::content_blogs))
        .routes(routes!(handlers::blog::content_blogs_by_category))
        .routes(routes!(handlers::blog::latest_three_blogs))
        .routes(routes!(handlers::blog::update_blog))
        .routes(routes!(handlers::blog::delete_blog))
        .routes(routes!(handlers::blog::toggle_publish))
        .layer(handlers::blog::upload_body_limit())
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::category::list_categories))
}

fn form_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::form::submit_form))
        .routes(routes!(handlers::form::list_form_submissions))
        .routes(routes!(handlers::form::list_request_types))
}

fn url_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::url::add_url))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::auth::login))
}
