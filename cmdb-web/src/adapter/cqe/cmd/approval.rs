use serde::{Deserialize, Serialize};
use validator::Validate;

/// 审批动作：外部界面只传 sn 和审批人，晋升由服务端完成
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveCmd {
    #[validate(length(min = 1, message = "pending sn is empty"))]
    pub sn: String,
    #[validate(length(min = 1, message = "approver is empty"))]
    pub approver: String,
}
