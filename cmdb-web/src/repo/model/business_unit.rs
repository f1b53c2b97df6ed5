use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 业务线，可挂子业务线
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business_unit")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
    pub parent_unit_id: Option<String>,
    pub telephone: Option<String>,
    pub memo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentUnitId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    ParentUnit,
}

impl ActiveModelBehavior for ActiveModel {}
