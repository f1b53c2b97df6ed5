//! event log repo
//!
//! Append-only. Nothing here updates or deletes an entry; the only mutation
//! allowed is detaching the asset reference when the asset itself goes away.

use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, Order, QueryFilter,
    QueryOrder,
};

use crate::common::EventType;
use crate::repo::model::event_log;
use crate::service::fact::{ChangeAction, ComponentChange};

pub struct EventLogRepo;

impl EventLogRepo {
    pub async fn append<C: ConnectionTrait>(db: &C, entry: event_log::Model) -> Result<(), DbErr> {
        event_log::Entity::insert(entry.into_active_model())
            .exec(db)
            .await?;
        Ok(())
    }

    /// 组件变更事件：新增配件记 new-component，其余记 hardware-change
    pub fn hardware_entry(
        asset_id: &str,
        asset_name: &str,
        change: &ComponentChange,
        actor: Option<String>,
    ) -> event_log::Model {
        let event_type = match change.action {
            ChangeAction::Add => EventType::NewComponent,
            ChangeAction::Update | ChangeAction::Retire => EventType::HardwareChange,
        };
        let mut entry = event_log::Model::new();
        entry.name = format!(
            "{} {}: {}",
            change.kind.as_ref(),
            change.action.as_ref(),
            asset_name
        );
        entry.asset_id = Some(asset_id.to_string());
        entry.event_type = event_type as i32;
        entry.component = Some(change.kind.as_ref().to_string());
        entry.detail = format!("[{}] {}", change.key, change.detail);
        entry.user = actor;
        entry
    }

    pub async fn list_by_asset(
        db: &DbConn,
        asset_id: &str,
    ) -> Result<Vec<event_log::Model>, DbErr> {
        event_log::Entity::find()
            .filter(event_log::Column::AssetId.eq(asset_id))
            .order_by(event_log::Column::CreatedAt, Order::Desc)
            .all(db)
            .await
    }

    pub async fn detach_asset<C: ConnectionTrait>(db: &C, asset_id: &str) -> Result<(), DbErr> {
        event_log::Entity::update_many()
            .set(event_log::ActiveModel {
                asset_id: Set(None),
                ..Default::default()
            })
            .filter(event_log::Column::AssetId.eq(asset_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
