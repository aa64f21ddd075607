pub mod auth;
pub mod blog;
pub mod form;
pub mod shared;
pub mod url;
