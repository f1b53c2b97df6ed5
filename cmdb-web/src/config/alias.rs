//! runtime state
//!
//! 启动时构造一次，显式传给 axum 和各 service，不留全局可变量。

use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};

use super::AppConfig;
use crate::error::AppError;
use crate::repo::schema;
use crate::service::reconcile::ReconcileService;

#[derive(Clone, Default)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub reconciler: Arc<ReconcileService>,
}

pub async fn init_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    let conn = Database::connect(config.db_config.connect_url())
        .await
        .map_err(|e| AppError::Config(format!("create db conn: {e}")))?;
    tracing::debug!("db conn initialized");
    schema::setup(&conn).await?;
    let state = AppState {
        conn,
        reconciler: Arc::new(ReconcileService::new()),
    };
    tracing::debug!("app state initialized");
    Ok(state)
}
