use axum::extract::State;
use axum::Json;
use cmdb_common::RawReport;

use crate::adapter::vo::report::ReportResultVO;
use crate::adapter::Response;
use crate::config::AppState;
use crate::error::AppError;
use crate::service::normalize::normalize;

/// 采集端上报入口。归一化失败回 invalid-payload，其余交给对账引擎。
pub async fn report_asset(
    State(state): State<AppState>,
    Json(param): Json<RawReport>,
) -> Result<Json<Response<ReportResultVO>>, AppError> {
    let fact = normalize(param)?;
    let outcome = state.reconciler.reconcile(&state.conn, fact).await?;
    Ok(Json(Response::new_success(ReportResultVO::from(outcome))))
}
