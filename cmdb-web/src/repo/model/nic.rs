use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 网卡组件。(asset_id, model, mac) 联合唯一：虚拟网卡可能共用占位
/// mac，加上型号后才是真键。
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nic")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub asset_id: String,
    pub name: Option<String>,
    pub model: String,
    pub mac: String,
    pub ip_address: Option<String>,
    pub net_mask: Option<String>,
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
