use serde::{Deserialize, Serialize};

use crate::service::approve::PromoteOutcome;
use crate::service::fact::ComponentChange;
use crate::service::reconcile::ReconcileOutcome;

/// 上报结果：queued / reconciled / name-conflict
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportResultVO {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ComponentChange>,
}

impl From<ReconcileOutcome> for ReportResultVO {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::Queued { created } => ReportResultVO {
                result: "queued".to_string(),
                created: Some(created),
                ..Default::default()
            },
            ReconcileOutcome::Reconciled { changes } => ReportResultVO {
                result: "reconciled".to_string(),
                changes,
                ..Default::default()
            },
            ReconcileOutcome::NameConflict { name } => ReportResultVO {
                result: "name-conflict".to_string(),
                name: Some(name),
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproveResultVO {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ComponentChange>,
}

impl From<PromoteOutcome> for ApproveResultVO {
    fn from(outcome: PromoteOutcome) -> Self {
        match outcome {
            PromoteOutcome::Promoted { asset_id } => ApproveResultVO {
                result: "promoted".to_string(),
                asset_id: Some(asset_id),
                ..Default::default()
            },
            PromoteOutcome::AlreadyPromoted => ApproveResultVO {
                result: "already-promoted".to_string(),
                ..Default::default()
            },
            PromoteOutcome::Merged { changes } => ApproveResultVO {
                result: "merged".to_string(),
                changes,
                ..Default::default()
            },
        }
    }
}
