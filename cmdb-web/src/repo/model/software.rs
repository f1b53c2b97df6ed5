use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 付费软件资产：无实体形态，不关联 Asset 行，只记授权数和版本
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "software")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sub_type: i32,
    pub license_num: i32,
    #[sea_orm(unique)]
    pub version: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
