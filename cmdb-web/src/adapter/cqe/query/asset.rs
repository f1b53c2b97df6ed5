use crate::common::PageQuery;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListQuery {
    #[serde(default)]
    pub page_query: PageQuery,
    pub name: Option<String>,
    pub sn: Option<String>,
    pub asset_type: Option<String>,
    pub status: Option<i32>,
}
