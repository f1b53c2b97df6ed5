//! axum server

use crate::config::{AppConfig, AppState};
use crate::{adapter::http::routes, error::AppError};

pub async fn start_http_server(config: &AppConfig, state: AppState) -> Result<(), AppError> {
    let url = config.server.url();
    tracing::info!("start server: {}", url);
    let listener = tokio::net::TcpListener::bind(&url)
        .await
        .map_err(|e| AppError::Config(format!("bind `{url}`: {e}")))?;
    axum::serve(listener, routes(state).await)
        .await
        .map_err(|e| AppError::Config(e.to_string()))?;
    tracing::info!("end server");
    Ok(())
}
