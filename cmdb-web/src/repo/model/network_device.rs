use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "network_device")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub asset_id: String,
    pub sub_type: i32,
    pub created_by: String,
    pub model: Option<String>,
    pub vlan_ip: Option<String>,
    pub intranet_ip: Option<String>,
    pub firmware: Option<String>,
    pub port_num: Option<i32>,
    pub detail: Option<String>,
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
