use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingListItemVO {
    pub id: String,
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
    pub approved: bool,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}
