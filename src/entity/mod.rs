pub mod blog;
pub mod blog_category;
pub mod form_submission;
pub mod login_user;
pub mod request_type;
pub mod seo_url;
