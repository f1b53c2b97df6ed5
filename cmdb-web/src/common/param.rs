use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    page: u64,
    size: u64,
}

impl PageQuery {
    pub fn init(&self) -> (u64, u64) {
        // 页码从1开始，页大小缺省10、封顶500
        let size = if self.size == 0 { 10 } else { self.size.min(500) };
        (self.page.max(1), size)
    }
}
