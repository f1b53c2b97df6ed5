//! approval promotion
//!
//! One-time conversion of an approved pending report into the full asset
//! graph: asset row + typed sub-asset + CPU/RAM/disk/NIC rows, all in one
//! transaction with the pending-row delete. Deleting the pending row first
//! is the exactly-once guard: the second of two racing approvals sees zero
//! rows affected and backs out.

use sea_orm::{DbConn, DbErr, SqlErr, TransactionTrait};

use crate::common::{AssetStatus, EventType};
use crate::error::AppError;
use crate::repo::model::{asset, event_log};
use crate::repo::sea::{AssetRepo, ComponentRepo, EventLogRepo, PendingRepo, SubAssetRepo};
use crate::service::diff::diff_components;
use crate::service::fact::{ComponentChange, FactRecord};
use crate::service::reconcile::{ReconcileOutcome, ReconcileService};

#[derive(Debug, Clone, PartialEq)]
pub enum PromoteOutcome {
    Promoted { asset_id: String },
    /// 重复批准：无事可做，对调用方不算错误
    AlreadyPromoted,
    /// 撞上并发晋升，按既有资产完成了一次对账
    Merged { changes: Vec<ComponentChange> },
}

pub async fn promote(
    db: &DbConn,
    reconciler: &ReconcileService,
    sn: &str,
    approver: &str,
) -> Result<PromoteOutcome, AppError> {
    let lock = reconciler.lock_for(sn);
    let guard = lock.lock().await;

    let Some(pending) = PendingRepo::find_by_sn(db, sn).await? else {
        return Ok(PromoteOutcome::AlreadyPromoted);
    };
    let fact: FactRecord = serde_json::from_str(&pending.data).map_err(|e| {
        AppError::InvalidPayload(format!("stored report for `{sn}` is unreadable: {e}"))
    })?;

    // 批准标记先落库：晋升中途崩溃后重试仍可继续，期间的重复汇报会被挡住
    if !pending.approved {
        PendingRepo::mark_approved(db, sn).await?;
    }

    match insert_graph(db, &fact, approver).await {
        Ok(Some(asset_id)) => {
            tracing::info!(sn, %asset_id, approver, "pending report promoted");
            Ok(PromoteOutcome::Promoted { asset_id })
        }
        Ok(None) => Ok(PromoteOutcome::AlreadyPromoted),
        Err(e) if is_unique_violation(&e) => {
            // 并发晋升输掉的一方：先按既有资产走一次对账，再不行才报冲突
            drop(guard);
            match reconciler.reconcile(db, fact).await {
                Ok(ReconcileOutcome::Reconciled { changes }) => {
                    PendingRepo::delete_by_sn(db, sn).await?;
                    Ok(PromoteOutcome::Merged { changes })
                }
                Ok(ReconcileOutcome::NameConflict { name }) => Err(AppError::NameConflict(name)),
                _ => Err(AppError::DuplicateSerial(sn.to_string())),
            }
        }
        Err(e) => Err(e.into()),
    }
}

async fn insert_graph(
    db: &DbConn,
    fact: &FactRecord,
    approver: &str,
) -> Result<Option<String>, DbErr> {
    let txn = db.begin().await?;

    if PendingRepo::delete_by_sn(&txn, &fact.sn).await? == 0 {
        txn.rollback().await?;
        return Ok(None);
    }

    let mut asset = asset::Model::new();
    asset.name = fact.display_name();
    asset.sn = fact.sn.clone();
    asset.asset_type = fact.asset_type.as_ref().to_string();
    asset.status = AssetStatus::Online as i32;
    asset.approved_by = Some(approver.to_string());
    let asset_id = AssetRepo::insert_asset_one(&txn, asset.clone()).await?;

    SubAssetRepo::create_for(&txn, &asset, Some(fact), "auto").await?;
    ComponentRepo::upsert_cpu(&txn, &asset_id, fact).await?;
    // 首次建档和增量对账走同一条插入路径：存量集为空的差异
    ComponentRepo::apply_ram(&txn, &asset_id, &diff_components(&[], &fact.ram)).await?;
    ComponentRepo::apply_disk(&txn, &asset_id, &diff_components(&[], &fact.disk)).await?;
    ComponentRepo::apply_nic(&txn, &asset_id, &diff_components(&[], &fact.nic)).await?;

    let mut entry = event_log::Model::new();
    entry.name = format!("asset online: {}", asset.name);
    entry.asset_id = Some(asset_id.clone());
    entry.event_type = EventType::Online as i32;
    entry.detail = format!("approved from pending report, sn `{}`", fact.sn);
    entry.user = Some(approver.to_string());
    EventLogRepo::append(&txn, entry).await?;

    txn.commit().await?;
    Ok(Some(asset_id))
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
