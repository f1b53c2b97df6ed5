//! pending approval repo

use chrono::Local;
use sea_orm::sea_query::ConditionExpression;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
};

use crate::repo::model::pending_asset;
use crate::repo::sea::{opt, SeaRepo};
use crate::service::fact::FactRecord;

pub struct PendingRepo;

impl PendingRepo {
    pub async fn find_by_sn<C: ConnectionTrait>(
        db: &C,
        sn: &str,
    ) -> Result<Option<pending_asset::Model>, DbErr> {
        pending_asset::Entity::find()
            .filter(pending_asset::Column::Sn.eq(sn))
            .one(db)
            .await
    }

    /// 首次汇报：新建待审批行，approved=false
    pub async fn insert_from_fact<C: ConnectionTrait>(
        db: &C,
        fact: &FactRecord,
    ) -> anyhow::Result<()> {
        let model = Self::summary_model(fact)?;
        pending_asset::Entity::insert(model.into_active_model())
            .exec(db)
            .await?;
        Ok(())
    }

    /// 重复汇报：摘要和数据原地覆盖，批准状态与创建时间不动
    pub async fn refresh_from_fact<C: ConnectionTrait>(
        db: &C,
        fact: &FactRecord,
    ) -> anyhow::Result<()> {
        let summary = Self::summary_model(fact)?;
        pending_asset::Entity::update_many()
            .set(pending_asset::ActiveModel {
                asset_type: Set(summary.asset_type),
                manufacturer: Set(summary.manufacturer),
                model: Set(summary.model),
                ram_size: Set(summary.ram_size),
                cpu_model: Set(summary.cpu_model),
                cpu_count: Set(summary.cpu_count),
                cpu_core_count: Set(summary.cpu_core_count),
                os_type: Set(summary.os_type),
                os_distribution: Set(summary.os_distribution),
                os_release: Set(summary.os_release),
                data: Set(summary.data),
                updated_at: Set(Local::now()),
                ..Default::default()
            })
            .filter(pending_asset::Column::Sn.eq(&fact.sn))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn mark_approved<C: ConnectionTrait>(db: &C, sn: &str) -> Result<u64, DbErr> {
        let res = pending_asset::Entity::update_many()
            .set(pending_asset::ActiveModel {
                approved: Set(true),
                updated_at: Set(Local::now()),
                ..Default::default()
            })
            .filter(pending_asset::Column::Sn.eq(sn))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn delete_by_sn<C: ConnectionTrait>(db: &C, sn: &str) -> Result<u64, DbErr> {
        let res = pending_asset::Entity::delete_many()
            .filter(pending_asset::Column::Sn.eq(sn))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn find_pending_by(
        db: &DbConn,
        pg: (u64, u64),
        search: Option<Vec<ConditionExpression>>,
    ) -> anyhow::Result<(u64, Vec<pending_asset::Model>)> {
        SeaRepo::page_with_default::<pending_asset::Entity>(db, pg, search).await
    }

    fn summary_model(fact: &FactRecord) -> anyhow::Result<pending_asset::Model> {
        let mut m = pending_asset::Model::new();
        m.sn = fact.sn.clone();
        m.asset_type = fact.asset_type.as_ref().to_string();
        m.manufacturer = opt(&fact.board.manufacturer);
        m.model = opt(&fact.board.model);
        m.ram_size = Some(fact.ram_total_size);
        m.cpu_model = opt(&fact.cpu_model);
        m.cpu_count = Some(fact.cpu_count as i32);
        m.cpu_core_count = Some(fact.cpu_core_count as i32);
        m.os_type = opt(&fact.os_type);
        m.os_distribution = opt(&fact.os_distribution);
        m.os_release = opt(&fact.os_release);
        m.data = serde_json::to_string(fact)?;
        Ok(m)
    }
}
