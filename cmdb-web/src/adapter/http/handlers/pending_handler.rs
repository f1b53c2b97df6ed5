use crate::adapter::cmd::approval::ApproveCmd;
use crate::adapter::query::pending::PendingListQuery;
use crate::adapter::vo::pending::PendingListItemVO;
use crate::adapter::vo::report::ApproveResultVO;
use crate::adapter::{ResList, Response, ResponseSuccess};
use crate::config::AppState;
use crate::error::{AppError, AppJson};
use crate::repo::model::pending_asset;
use crate::repo::sea::{PendingRepo, SeaRepo};
use crate::service::approve;
use axum::extract::{Path, State};
use axum::Json;
use sea_orm::sea_query::ConditionExpression;
use sea_orm::{ColumnTrait, Condition};

pub async fn list_pending(
    State(state): State<AppState>,
    Json(query): Json<PendingListQuery>,
) -> Result<Json<Response<ResList<PendingListItemVO>>>, AppError> {
    let mut search_option = Vec::new();
    if let Some(sn) = query.sn {
        if !sn.is_empty() {
            search_option.push(ConditionExpression::Condition(
                Condition::all().add(pending_asset::Column::Sn.contains(sn)),
            ))
        }
    }
    if let Some(ty) = query.asset_type {
        search_option.push(ConditionExpression::Condition(
            Condition::all().add(pending_asset::Column::AssetType.eq(ty)),
        ))
    }
    if let Some(approved) = query.approved {
        search_option.push(ConditionExpression::Condition(
            Condition::all().add(pending_asset::Column::Approved.eq(approved)),
        ))
    }

    PendingRepo::find_pending_by(&state.conn, query.page_query.init(), Some(search_option))
        .await
        .map(|list| {
            Ok(Json(Response::new_success(ResList::new(
                list.0,
                list.1
                    .into_iter()
                    .map(|d| PendingListItemVO {
                        id: d.id,
                        sn: d.sn,
                        asset_type: d.asset_type,
                        manufacturer: d.manufacturer,
                        model: d.model,
                        ram_size: d.ram_size,
                        cpu_model: d.cpu_model,
                        cpu_count: d.cpu_count,
                        cpu_core_count: d.cpu_core_count,
                        os_type: d.os_type,
                        os_distribution: d.os_distribution,
                        os_release: d.os_release,
                        approved: d.approved,
                        created_at: d.created_at,
                        updated_at: d.updated_at,
                    })
                    .collect(),
            ))))
        })?
}

/// 运维驳回：待审批行直接删掉，下次汇报重新排队
pub async fn delete_pending_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResponseSuccess>, AppError> {
    SeaRepo::delete_by_id::<pending_asset::Entity>(&state.conn, &id).await?;
    Ok(Json(ResponseSuccess::default()))
}

/// 审批通过即触发晋升。重复审批是幂等空操作，不算错误。
pub async fn approve_pending(
    State(state): State<AppState>,
    AppJson(param): AppJson<ApproveCmd>,
) -> Result<Json<Response<ApproveResultVO>>, AppError> {
    let outcome = approve::promote(
        &state.conn,
        &state.reconciler,
        &param.sn,
        &param.approver,
    )
    .await?;
    Ok(Json(Response::new_success(ApproveResultVO::from(outcome))))
}
