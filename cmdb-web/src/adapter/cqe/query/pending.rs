use crate::common::PageQuery;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingListQuery {
    #[serde(default)]
    pub page_query: PageQuery,
    pub sn: Option<String>,
    pub asset_type: Option<String>,
    pub approved: Option<bool>,
}
