//! sub-asset repo
//!
//! One typed row per device asset, created at promotion (or manual entry)
//! and refreshed with the denormalized os/model fields on every reconcile.
//! Software assets carry no sub-asset row.

use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter};
use std::str::FromStr;

use crate::common::AssetType;
use crate::repo::model::{asset, network_device, security_device, server, storage_device};
use crate::repo::sea::opt;
use crate::service::fact::FactRecord;

pub struct SubAssetRepo;

impl SubAssetRepo {
    pub async fn create_for<C: ConnectionTrait>(
        db: &C,
        asset: &asset::Model,
        fact: Option<&FactRecord>,
        created_by: &str,
    ) -> Result<(), DbErr> {
        let Ok(asset_type) = AssetType::from_str(&asset.asset_type) else {
            return Ok(());
        };
        let model = fact.map(|f| f.board.model.as_str()).unwrap_or_default();
        match asset_type {
            AssetType::Server => {
                let mut m = server::Model::new(&asset.id);
                m.created_by = created_by.to_string();
                m.model = opt(model);
                if let Some(f) = fact {
                    m.os_type = opt(&f.os_type);
                    m.os_distribution = opt(&f.os_distribution);
                    m.os_release = opt(&f.os_release);
                }
                server::Entity::insert(m.into_active_model()).exec(db).await?;
            }
            AssetType::NetworkDevice => {
                let mut m = network_device::Model::new(&asset.id);
                m.created_by = created_by.to_string();
                m.model = opt(model);
                network_device::Entity::insert(m.into_active_model())
                    .exec(db)
                    .await?;
            }
            AssetType::StorageDevice => {
                let mut m = storage_device::Model::new(&asset.id);
                m.created_by = created_by.to_string();
                m.model = opt(model);
                storage_device::Entity::insert(m.into_active_model())
                    .exec(db)
                    .await?;
            }
            AssetType::SecurityDevice => {
                let mut m = security_device::Model::new(&asset.id);
                m.created_by = created_by.to_string();
                m.model = opt(model);
                security_device::Entity::insert(m.into_active_model())
                    .exec(db)
                    .await?;
            }
            AssetType::Software => {}
        }
        Ok(())
    }

    pub async fn refresh_from_fact<C: ConnectionTrait>(
        db: &C,
        asset: &asset::Model,
        fact: &FactRecord,
    ) -> Result<(), DbErr> {
        let Ok(asset_type) = AssetType::from_str(&asset.asset_type) else {
            return Ok(());
        };
        match asset_type {
            AssetType::Server => {
                server::Entity::update_many()
                    .set(server::ActiveModel {
                        model: Set(opt(&fact.board.model)),
                        os_type: Set(opt(&fact.os_type)),
                        os_distribution: Set(opt(&fact.os_distribution)),
                        os_release: Set(opt(&fact.os_release)),
                        ..Default::default()
                    })
                    .filter(server::Column::AssetId.eq(&asset.id))
                    .exec(db)
                    .await?;
            }
            AssetType::NetworkDevice => {
                network_device::Entity::update_many()
                    .set(network_device::ActiveModel {
                        model: Set(opt(&fact.board.model)),
                        ..Default::default()
                    })
                    .filter(network_device::Column::AssetId.eq(&asset.id))
                    .exec(db)
                    .await?;
            }
            AssetType::StorageDevice => {
                storage_device::Entity::update_many()
                    .set(storage_device::ActiveModel {
                        model: Set(opt(&fact.board.model)),
                        ..Default::default()
                    })
                    .filter(storage_device::Column::AssetId.eq(&asset.id))
                    .exec(db)
                    .await?;
            }
            AssetType::SecurityDevice => {
                security_device::Entity::update_many()
                    .set(security_device::ActiveModel {
                        model: Set(opt(&fact.board.model)),
                        ..Default::default()
                    })
                    .filter(security_device::Column::AssetId.eq(&asset.id))
                    .exec(db)
                    .await?;
            }
            AssetType::Software => {}
        }
        Ok(())
    }
}
