use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::upload::store::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub uploads: UploadStore,
    pub config: AppConfig,
}
