use axum::middleware;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::adapter::http::handlers::{
    approve_pending, delete_asset_by_id, delete_pending_by_id, get_asset_by_id, list_asset,
    list_asset_events, list_pending, report_asset, save_asset,
};
use crate::adapter::http::middleware::request_id;
use crate::config::AppState;

pub async fn routes(state: AppState) -> Router {
    Router::new()
        .route("/hello", get(hello))
        .nest(
            "/api/asset",
            Router::new()
                .route("/", post(save_asset))
                .route("/report", post(report_asset))
                .route("/list", post(list_asset))
                .route("/:id", get(get_asset_by_id).delete(delete_asset_by_id))
                .route("/:id/events", get(list_asset_events)),
        )
        .nest(
            "/api/pending",
            Router::new()
                .route("/list", post(list_pending))
                .route("/approve", post(approve_pending))
                .route("/:id", delete(delete_pending_by_id)),
        )
        .layer(middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// 存活探针
async fn hello() -> &'static str {
    "Hello, World!"
}
