use chrono::Local;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 新资产待审批区：每个未匹配 sn 一行，重复汇报原地覆盖。
/// data 列存归一化后的完整事实记录(JSON)，审批通过后由 promotion 消费。
#[derive(Clone, Debug, Default, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_asset")]
#[serde(default)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub sn: String,
    pub asset_type: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub ram_size: Option<i64>,
    pub cpu_model: Option<String>,
    pub cpu_count: Option<i32>,
    pub cpu_core_count: Option<i32>,
    pub os_type: Option<String>,
    pub os_distribution: Option<String>,
    pub os_release: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    pub approved: bool,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
