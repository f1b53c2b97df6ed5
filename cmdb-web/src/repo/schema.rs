//! schema bootstrap
//!
//! Tables are created from the entities at startup (idempotent), then the
//! composite uniques the intake pipeline leans on. Constraints live here, at
//! the storage layer, not only in application code: duplicate serials and
//! orphaned components must be impossible under concurrent writers.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityName, EntityTrait, Schema};

use crate::repo::model::{
    asset, asset_tag, business_unit, contract, cpu, disk, event_log, idc, manufacturer,
    network_device, nic, pending_asset, ram, security_device, server, software, storage_device,
    tag,
};

pub async fn setup(db: &DbConn) -> Result<(), DbErr> {
    // 被引用的表在前，带外键的表在后
    create_table(db, manufacturer::Entity).await?;
    create_table(db, business_unit::Entity).await?;
    create_table(db, idc::Entity).await?;
    create_table(db, contract::Entity).await?;
    create_table(db, tag::Entity).await?;
    create_table(db, asset::Entity).await?;
    create_table(db, asset_tag::Entity).await?;
    create_table(db, server::Entity).await?;
    create_table(db, network_device::Entity).await?;
    create_table(db, storage_device::Entity).await?;
    create_table(db, security_device::Entity).await?;
    create_table(db, software::Entity).await?;
    create_table(db, cpu::Entity).await?;
    create_table(db, ram::Entity).await?;
    create_table(db, disk::Entity).await?;
    create_table(db, nic::Entity).await?;
    create_table(db, event_log::Entity).await?;
    create_table(db, pending_asset::Entity).await?;

    create_index(
        db,
        Index::create()
            .name("uk_ram_asset_slot")
            .table(ram::Entity.table_ref())
            .col(ram::Column::AssetId)
            .col(ram::Column::Slot)
            .unique()
            .to_owned(),
    )
    .await?;
    create_index(
        db,
        Index::create()
            .name("uk_disk_asset_sn")
            .table(disk::Entity.table_ref())
            .col(disk::Column::AssetId)
            .col(disk::Column::Sn)
            .unique()
            .to_owned(),
    )
    .await?;
    create_index(
        db,
        Index::create()
            .name("uk_nic_asset_model_mac")
            .table(nic::Entity.table_ref())
            .col(nic::Column::AssetId)
            .col(nic::Column::Model)
            .col(nic::Column::Mac)
            .unique()
            .to_owned(),
    )
    .await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DbConn, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

// mysql 不认 CREATE INDEX IF NOT EXISTS，重复建索引按已存在处理
async fn create_index(db: &DbConn, stmt: IndexCreateStatement) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    match db.execute(backend.build(&stmt)).await {
        Ok(_) => Ok(()),
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("already exists") || msg.contains("Duplicate key name") {
                Ok(())
            } else {
                Err(e)
            }
        }
    }
}
