use crate::adapter::cmd::asset::AssetSaveCmd;
use crate::adapter::query::asset::AssetListQuery;
use crate::adapter::vo::asset::{AssetListItemVO, AssetVO, CpuVO};
use crate::adapter::vo::event_log::EventLogVO;
use crate::adapter::{ResList, Response, ResponseSuccess};
use crate::config::AppState;
use crate::error::{AppError, AppJson};
use crate::repo::model::asset;
use crate::repo::sea::{AssetRepo, ComponentRepo, EventLogRepo, SubAssetRepo};
use axum::extract::{Path, State};
use axum::Json;
use sea_orm::sea_query::ConditionExpression;
use sea_orm::{ColumnTrait, Condition};

pub async fn save_asset(
    State(state): State<AppState>,
    AppJson(param): AppJson<AssetSaveCmd>,
) -> Result<Json<Response<String>>, AppError> {
    match &param.id {
        None => {
            let mut model = cmdb_common::copy::<_, asset::Model>(&param)
                .map_err(|e| AppError::InvalidPayload(e.to_string()))?;
            let fresh = asset::Model::new();
            model.id = fresh.id;
            model.created_at = fresh.created_at;
            model.updated_at = fresh.updated_at;
            model.asset_type = param.asset_type.as_ref().to_string();
            let id = AssetRepo::insert_asset_one(&state.conn, model.clone()).await?;
            // 手工录入的设备同样挂一条类型化子资产
            SubAssetRepo::create_for(&state.conn, &model, None, "manual").await?;
            Ok(Json(Response::new_success(id)))
        }
        Some(id) => {
            let mut model = AssetRepo::get_asset_by_id(&state.conn, id).await?;
            model.name = param.name;
            model.sn = param.sn;
            model.asset_type = param.asset_type.as_ref().to_string();
            if let Some(status) = param.status {
                model.status = status;
            }
            model.manage_ip = param.manage_ip;
            model.admin = param.admin;
            model.business_unit_id = param.business_unit_id;
            model.manufacturer_id = param.manufacturer_id;
            model.idc_id = param.idc_id;
            model.contract_id = param.contract_id;
            model.price = param.price;
            model.memo = param.memo;
            let updated = AssetRepo::update_asset_by_id(&state.conn, model).await?;
            Ok(Json(Response::new_success(updated.id)))
        }
    }
}

pub async fn get_asset_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Response<AssetVO>>, AppError> {
    let asset = AssetRepo::get_asset_by_id(&state.conn, &id).await?;
    let cpu = ComponentRepo::find_cpu(&state.conn, &id).await?.map(|c| CpuVO {
        cpu_model: c.cpu_model,
        cpu_count: c.cpu_count,
        cpu_core_count: c.cpu_core_count,
    });
    let vo = AssetVO {
        id: asset.id,
        name: asset.name,
        sn: asset.sn,
        asset_type: asset.asset_type,
        status: asset.status,
        manage_ip: asset.manage_ip,
        admin: asset.admin,
        memo: asset.memo,
        approved_by: asset.approved_by,
        cpu,
        ram: ComponentRepo::ram_facts(&state.conn, &id).await?,
        disk: ComponentRepo::disk_facts(&state.conn, &id).await?,
        nic: ComponentRepo::nic_facts(&state.conn, &id).await?,
    };
    Ok(Json(Response::new_success(vo)))
}

pub async fn list_asset(
    State(state): State<AppState>,
    Json(query): Json<AssetListQuery>,
) -> Result<Json<Response<ResList<AssetListItemVO>>>, AppError> {
    let mut search_option = Vec::new();
    if let Some(name) = query.name {
        if !name.is_empty() {
            search_option.push(ConditionExpression::Condition(
                Condition::all().add(asset::Column::Name.contains(name)),
            ))
        }
    }
    if let Some(sn) = query.sn {
        if !sn.is_empty() {
            search_option.push(ConditionExpression::Condition(
                Condition::all().add(asset::Column::Sn.contains(sn)),
            ))
        }
    }
    if let Some(ty) = query.asset_type {
        search_option.push(ConditionExpression::Condition(
            Condition::all().add(asset::Column::AssetType.eq(ty)),
        ))
    }
    if let Some(status) = query.status {
        search_option.push(ConditionExpression::Condition(
            Condition::all().add(asset::Column::Status.eq(status)),
        ))
    }

    AssetRepo::find_asset_by(&state.conn, query.page_query.init(), Some(search_option))
        .await
        .map(|list| {
            Ok(Json(Response::new_success(ResList::new(
                list.0,
                list.1
                    .into_iter()
                    .map(|d| AssetListItemVO {
                        id: d.id,
                        name: d.name,
                        sn: d.sn,
                        asset_type: d.asset_type,
                        status: d.status,
                        manage_ip: d.manage_ip,
                        admin: d.admin,
                        approved_by: d.approved_by,
                        created_at: d.created_at,
                        updated_at: d.updated_at,
                    })
                    .collect(),
            ))))
        })?
}

pub async fn delete_asset_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResponseSuccess>, AppError> {
    AssetRepo::delete_deep(&state.conn, &id).await?;
    Ok(Json(ResponseSuccess::default()))
}

pub async fn list_asset_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Response<Vec<EventLogVO>>>, AppError> {
    let list = EventLogRepo::list_by_asset(&state.conn, &id)
        .await?
        .into_iter()
        .map(|d| EventLogVO {
            id: d.id,
            name: d.name,
            asset_id: d.asset_id,
            event_type: d.event_type,
            component: d.component,
            detail: d.detail,
            user: d.user,
            created_at: d.created_at,
        })
        .collect();
    Ok(Json(Response::new_success(list)))
}
