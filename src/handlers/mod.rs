pub mod auth;
pub mod blog;
pub mod category;
pub mod form;
pub mod url;
