use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 硬盘组件。(asset_id, sn) 联合唯一：同一块盘不会重复入库，
/// 换盘(同槽位新SN)表现为 retire + insert。
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "disk")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub asset_id: String,
    pub sn: String,
    pub slot: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub capacity: Option<i64>,
    pub interface_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset::Entity",
        from = "Column::AssetId",
        to = "super::asset::Column::Id",
        on_delete = "Cascade"
    )]
    Asset,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(asset_id: &str) -> Model {
        Model {
            id: Uuid::new_v4().to_string(),
            asset_id: asset_id.to_string(),
            ..Default::default()
        }
    }
}
