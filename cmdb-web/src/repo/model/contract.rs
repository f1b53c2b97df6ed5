use chrono::Local;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 合同
#[derive(Clone, Debug, Default, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub sn: String,
    pub name: String,
    pub price: Option<f64>,
    pub detail: Option<String>,
    pub start_day: Option<chrono::NaiveDate>,
    pub end_day: Option<chrono::NaiveDate>,
    pub license_num: Option<i32>,
    pub memo: Option<String>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
