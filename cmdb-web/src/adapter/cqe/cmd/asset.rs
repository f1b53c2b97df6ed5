use crate::common::AssetType;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 手工录入/编辑资产
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssetSaveCmd {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "asset name is empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "asset sn is empty"))]
    pub sn: String,
    pub asset_type: AssetType,
    pub status: Option<i32>,
    pub manage_ip: Option<String>,
    pub admin: Option<String>,
    pub business_unit_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub idc_id: Option<String>,
    pub contract_id: Option<String>,
    pub price: Option<f64>,
    pub memo: Option<String>,
}
