//! component repo
//!
//! Persists the outcome of the diff engine for one asset: RAM keyed by slot,
//! disks by serial, NICs by (model, mac). The CPU is a one-to-one row with
//! overwrite semantics.

use crate::repo::model::{cpu, disk, nic, ram};
use crate::repo::sea::{flat, opt};
use crate::service::diff::ComponentDiff;
use crate::service::fact::{
    ChangeAction, ComponentChange, ComponentKind, DiskFact, FactRecord, NicFact, RamFact,
};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter};

impl From<ram::Model> for RamFact {
    fn from(m: ram::Model) -> Self {
        RamFact {
            slot: m.slot,
            capacity: m.capacity.unwrap_or_default(),
            model: flat(&m.model),
            manufacturer: flat(&m.manufacturer),
            sn: flat(&m.sn),
        }
    }
}

impl From<disk::Model> for DiskFact {
    fn from(m: disk::Model) -> Self {
        DiskFact {
            sn: m.sn,
            slot: flat(&m.slot),
            model: flat(&m.model),
            manufacturer: flat(&m.manufacturer),
            capacity: m.capacity.unwrap_or_default(),
            interface_type: m.interface_type,
        }
    }
}

impl From<nic::Model> for NicFact {
    fn from(m: nic::Model) -> Self {
        NicFact {
            name: flat(&m.name),
            model: m.model,
            mac: m.mac,
            ip_address: flat(&m.ip_address),
            net_mask: flat(&m.net_mask),
        }
    }
}

pub struct ComponentRepo;

impl ComponentRepo {
    pub async fn ram_facts<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
    ) -> Result<Vec<RamFact>, DbErr> {
        Ok(ram::Entity::find()
            .filter(ram::Column::AssetId.eq(asset_id))
            .all(db)
            .await?
            .into_iter()
            .map(RamFact::from)
            .collect())
    }

    pub async fn disk_facts<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
    ) -> Result<Vec<DiskFact>, DbErr> {
        Ok(disk::Entity::find()
            .filter(disk::Column::AssetId.eq(asset_id))
            .all(db)
            .await?
            .into_iter()
            .map(DiskFact::from)
            .collect())
    }

    pub async fn nic_facts<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
    ) -> Result<Vec<NicFact>, DbErr> {
        Ok(nic::Entity::find()
            .filter(nic::Column::AssetId.eq(asset_id))
            .all(db)
            .await?
            .into_iter()
            .map(NicFact::from)
            .collect())
    }

    pub async fn apply_ram<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
        diff: &ComponentDiff<RamFact>,
    ) -> Result<(), DbErr> {
        for f in &diff.insert {
            let mut m = ram::Model::new(asset_id);
            m.slot = f.slot.clone();
            m.capacity = Some(f.capacity);
            m.model = opt(&f.model);
            m.manufacturer = opt(&f.manufacturer);
            m.sn = opt(&f.sn);
            ram::Entity::insert(m.into_active_model()).exec(db).await?;
        }
        for f in &diff.update {
            ram::Entity::update_many()
                .set(ram::ActiveModel {
                    capacity: Set(Some(f.capacity)),
                    model: Set(opt(&f.model)),
                    manufacturer: Set(opt(&f.manufacturer)),
                    sn: Set(opt(&f.sn)),
                    ..Default::default()
                })
                .filter(ram::Column::AssetId.eq(asset_id))
                .filter(ram::Column::Slot.eq(&f.slot))
                .exec(db)
                .await?;
        }
        if !diff.retire.is_empty() {
            let slots: Vec<String> = diff.retire.iter().map(|f| f.slot.clone()).collect();
            ram::Entity::delete_many()
                .filter(ram::Column::AssetId.eq(asset_id))
                .filter(ram::Column::Slot.is_in(slots))
                .exec(db)
                .await?;
        }
        Ok(())
    }

    pub async fn apply_disk<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
        diff: &ComponentDiff<DiskFact>,
    ) -> Result<(), DbErr> {
        for f in &diff.insert {
            let mut m = disk::Model::new(asset_id);
            m.sn = f.sn.clone();
            m.slot = opt(&f.slot);
            m.model = opt(&f.model);
            m.manufacturer = opt(&f.manufacturer);
            m.capacity = Some(f.capacity);
            m.interface_type = f.interface_type.clone();
            disk::Entity::insert(m.into_active_model()).exec(db).await?;
        }
        for f in &diff.update {
            disk::Entity::update_many()
                .set(disk::ActiveModel {
                    slot: Set(opt(&f.slot)),
                    model: Set(opt(&f.model)),
                    manufacturer: Set(opt(&f.manufacturer)),
                    capacity: Set(Some(f.capacity)),
                    interface_type: Set(f.interface_type.clone()),
                    ..Default::default()
                })
                .filter(disk::Column::AssetId.eq(asset_id))
                .filter(disk::Column::Sn.eq(&f.sn))
                .exec(db)
                .await?;
        }
        if !diff.retire.is_empty() {
            let sns: Vec<String> = diff.retire.iter().map(|f| f.sn.clone()).collect();
            disk::Entity::delete_many()
                .filter(disk::Column::AssetId.eq(asset_id))
                .filter(disk::Column::Sn.is_in(sns))
                .exec(db)
                .await?;
        }
        Ok(())
    }

    pub async fn apply_nic<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
        diff: &ComponentDiff<NicFact>,
    ) -> Result<(), DbErr> {
        for f in &diff.insert {
            let mut m = nic::Model::new(asset_id);
            m.name = opt(&f.name);
            m.model = f.model.clone();
            m.mac = f.mac.clone();
            m.ip_address = opt(&f.ip_address);
            m.net_mask = opt(&f.net_mask);
            nic::Entity::insert(m.into_active_model()).exec(db).await?;
        }
        for f in &diff.update {
            nic::Entity::update_many()
                .set(nic::ActiveModel {
                    name: Set(opt(&f.name)),
                    ip_address: Set(opt(&f.ip_address)),
                    net_mask: Set(opt(&f.net_mask)),
                    ..Default::default()
                })
                .filter(nic::Column::AssetId.eq(asset_id))
                .filter(nic::Column::Model.eq(&f.model))
                .filter(nic::Column::Mac.eq(&f.mac))
                .exec(db)
                .await?;
        }
        for f in &diff.retire {
            nic::Entity::delete_many()
                .filter(nic::Column::AssetId.eq(asset_id))
                .filter(nic::Column::Model.eq(&f.model))
                .filter(nic::Column::Mac.eq(&f.mac))
                .exec(db)
                .await?;
        }
        Ok(())
    }

    pub async fn find_cpu<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
    ) -> Result<Option<cpu::Model>, DbErr> {
        cpu::Entity::find()
            .filter(cpu::Column::AssetId.eq(asset_id))
            .one(db)
            .await
    }

    /// CPU 一对一，覆盖写；返回本次产生的变更(如有)
    pub async fn upsert_cpu<C: ConnectionTrait>(
        db: &C,
        asset_id: &str,
        fact: &FactRecord,
    ) -> Result<Option<ComponentChange>, DbErr> {
        let detail = format!(
            "{} x{} ({} cores)",
            fact.cpu_model, fact.cpu_count, fact.cpu_core_count
        );
        match cpu::Entity::find()
            .filter(cpu::Column::AssetId.eq(asset_id))
            .one(db)
            .await?
        {
            None => {
                let mut m = cpu::Model::new(asset_id);
                m.cpu_model = fact.cpu_model.clone();
                m.cpu_count = fact.cpu_count as i32;
                m.cpu_core_count = fact.cpu_core_count as i32;
                cpu::Entity::insert(m.into_active_model()).exec(db).await?;
                Ok(Some(ComponentChange::new(
                    ComponentKind::Cpu,
                    ChangeAction::Add,
                    &fact.cpu_model,
                    detail,
                )))
            }
            Some(row) => {
                if row.cpu_model == fact.cpu_model
                    && row.cpu_count == fact.cpu_count as i32
                    && row.cpu_core_count == fact.cpu_core_count as i32
                {
                    return Ok(None);
                }
                cpu::Entity::update_many()
                    .set(cpu::ActiveModel {
                        cpu_model: Set(fact.cpu_model.clone()),
                        cpu_count: Set(fact.cpu_count as i32),
                        cpu_core_count: Set(fact.cpu_core_count as i32),
                        ..Default::default()
                    })
                    .filter(cpu::Column::AssetId.eq(asset_id))
                    .exec(db)
                    .await?;
                Ok(Some(ComponentChange::new(
                    ComponentKind::Cpu,
                    ChangeAction::Update,
                    &fact.cpu_model,
                    detail,
                )))
            }
        }
    }
}
