use chrono::Local;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 所有资产的共有数据表。sn 是全流程唯一的自然键，name 仅供人读。
/// business_unit/manufacturer/idc/contract 外键为 SET NULL：关联对象删除
/// 不影响资产行。
#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub sn: String,
    pub asset_type: String,
    pub status: i32,
    pub manage_ip: Option<String>,
    pub business_unit_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub admin: Option<String>,
    pub idc_id: Option<String>,
    pub contract_id: Option<String>,
    pub purchase_day: Option<chrono::NaiveDate>,
    pub expire_day: Option<chrono::NaiveDate>,
    pub price: Option<f64>,
    pub approved_by: Option<String>,
    pub memo: Option<String>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::server::Entity")]
    Server,
    #[sea_orm(has_one = "super::network_device::Entity")]
    NetworkDevice,
    #[sea_orm(has_one = "super::storage_device::Entity")]
    StorageDevice,
    #[sea_orm(has_one = "super::security_device::Entity")]
    SecurityDevice,
    #[sea_orm(has_one = "super::cpu::Entity")]
    Cpu,
    #[sea_orm(has_many = "super::ram::Entity")]
    Ram,
    #[sea_orm(has_many = "super::disk::Entity")]
    Disk,
    #[sea_orm(has_many = "super::nic::Entity")]
    Nic,
    #[sea_orm(has_many = "super::event_log::Entity")]
    EventLog,
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id",
        on_delete = "SetNull"
    )]
    Manufacturer,
    #[sea_orm(
        belongs_to = "super::business_unit::Entity",
        from = "Column::BusinessUnitId",
        to = "super::business_unit::Column::Id",
        on_delete = "SetNull"
    )]
    BusinessUnit,
    #[sea_orm(
        belongs_to = "super::idc::Entity",
        from = "Column::IdcId",
        to = "super::idc::Column::Id",
        on_delete = "SetNull"
    )]
    Idc,
    #[sea_orm(
        belongs_to = "super::contract::Entity",
        from = "Column::ContractId",
        to = "super::contract::Column::Id",
        on_delete = "SetNull"
    )]
    Contract,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new() -> Model {
        Model {
            id: Uuid::new_v4().to_string(),
            created_at: Local::now(),
            updated_at: Local::now(),
            ..Default::default()
        }
    }
}
