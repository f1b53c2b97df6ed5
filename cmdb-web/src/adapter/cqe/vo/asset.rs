use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::service::fact::{DiskFact, NicFact, RamFact};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListItemVO {
    pub id: String,
    pub name: String,
    pub sn: String,
    pub asset_type: String,
    pub status: i32,
    pub manage_ip: Option<String>,
    pub admin: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuVO {
    pub cpu_model: String,
    pub cpu_count: i32,
    pub cpu_core_count: i32,
}

/// 资产详情：基本信息 + 组件清单
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetVO {
    pub id: String,
    pub name: String,
    pub sn: String,
    pub asset_type: String,
    pub status: i32,
    pub manage_ip: Option<String>,
    pub admin: Option<String>,
    pub memo: Option<String>,
    pub approved_by: Option<String>,
    pub cpu: Option<CpuVO>,
    pub ram: Vec<RamFact>,
    pub disk: Vec<DiskFact>,
    pub nic: Vec<NicFact>,
}
