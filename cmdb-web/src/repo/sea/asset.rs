//! asset repo

use crate::common::EventType;
use crate::repo::model::{
    asset, asset_tag, cpu, disk, event_log, network_device, nic, ram, security_device, server,
    storage_device,
};
use crate::repo::sea::{EventLogRepo, SeaRepo};
use sea_orm::sea_query::ConditionExpression;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, TransactionTrait,
};

pub struct AssetRepo;

impl AssetRepo {
    pub async fn insert_asset_one<C: ConnectionTrait>(
        db: &C,
        model: asset::Model,
    ) -> Result<String, DbErr> {
        let id = model.id.clone();
        asset::Entity::insert(model.into_active_model())
            .exec(db)
            .await?;
        Ok(id)
    }

    pub async fn get_asset_by_id(db: &DbConn, id: &str) -> Result<asset::Model, DbErr> {
        asset::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("not found".to_string()))
    }

    pub async fn find_by_sn<C: ConnectionTrait>(
        db: &C,
        sn: &str,
    ) -> Result<Option<asset::Model>, DbErr> {
        asset::Entity::find()
            .filter(asset::Column::Sn.eq(sn))
            .one(db)
            .await
    }

    pub async fn find_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<asset::Model>, DbErr> {
        asset::Entity::find()
            .filter(asset::Column::Name.eq(name))
            .one(db)
            .await
    }

    pub async fn update_asset_by_id(
        db: &DbConn,
        model: asset::Model,
    ) -> Result<asset::Model, DbErr> {
        let mut am = model.into_active_model();
        am.updated_at = sea_orm::ActiveValue::Set(chrono::Local::now());
        am.update(db).await
    }

    pub async fn touch<C: ConnectionTrait>(db: &C, id: &str) -> Result<(), DbErr> {
        asset::Entity::update_many()
            .set(asset::ActiveModel {
                updated_at: sea_orm::ActiveValue::Set(chrono::Local::now()),
                ..Default::default()
            })
            .filter(asset::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn find_asset_by(
        db: &DbConn,
        pg: (u64, u64),
        search: Option<Vec<ConditionExpression>>,
    ) -> anyhow::Result<(u64, Vec<asset::Model>)> {
        SeaRepo::page_with_default::<asset::Entity>(db, pg, search).await
    }

    /// 级联删除整个资产图：组件、子资产、标签关联一并硬删，
    /// 事件记录保留但摘掉资产引用。
    pub async fn delete_deep(db: &DbConn, id: &str) -> anyhow::Result<()> {
        let asset = Self::get_asset_by_id(db, id).await?;
        let txn = db.begin().await?;

        cpu::Entity::delete_many()
            .filter(cpu::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        ram::Entity::delete_many()
            .filter(ram::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        disk::Entity::delete_many()
            .filter(disk::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        nic::Entity::delete_many()
            .filter(nic::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        server::Entity::delete_many()
            .filter(server::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        network_device::Entity::delete_many()
            .filter(network_device::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        storage_device::Entity::delete_many()
            .filter(storage_device::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        security_device::Entity::delete_many()
            .filter(security_device::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;
        asset_tag::Entity::delete_many()
            .filter(asset_tag::Column::AssetId.eq(id))
            .exec(&txn)
            .await?;

        EventLogRepo::detach_asset(&txn, id).await?;
        asset::Entity::delete_by_id(id).exec(&txn).await?;

        // 下线事件挂不到已删除的资产上，asset_id 留空
        let mut entry = event_log::Model::new();
        entry.name = format!("asset removed: {}", asset.name);
        entry.event_type = EventType::Offline as i32;
        entry.detail = format!("asset sn `{}` deleted with all components", asset.sn);
        EventLogRepo::append(&txn, entry).await?;

        txn.commit().await?;
        Ok(())
    }
}
