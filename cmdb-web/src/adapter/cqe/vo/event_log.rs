use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogVO {
    pub id: String,
    pub name: String,
    pub asset_id: Option<String>,
    pub event_type: i32,
    pub component: Option<String>,
    pub detail: String,
    pub user: Option<String>,
    pub created_at: chrono::DateTime<Local>,
}
