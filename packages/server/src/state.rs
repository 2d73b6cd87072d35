use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Outbound client for the image-upload URL issuance call.
    pub http: reqwest::Client,
    pub config: AppConfig,
}
