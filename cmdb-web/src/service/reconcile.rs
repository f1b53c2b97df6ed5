//! reconciliation engine
//!
//! Given a normalized fact record, decide what it means against the current
//! inventory: a re-report for a known asset (component diff applied in
//! place), a new serial (queued for approval, idempotent by sn), or a name
//! collision (surfaced, never auto-merged). Serial number is the sole
//! identity key end to end.

use std::sync::Arc;

use dashmap::DashMap;
use sea_orm::{DbConn, TransactionTrait};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::common::EventType;
use crate::error::AppError;
use crate::repo::model::{asset, event_log};
use crate::repo::sea::{AssetRepo, ComponentRepo, EventLogRepo, PendingRepo, SubAssetRepo};
use crate::service::diff::{diff_components, ComponentDiff, ComponentFact};
use crate::service::fact::{ChangeAction, ComponentChange, ComponentKind, FactRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// 进了待审批区。created=false 表示原地覆盖已有待审批行
    Queued { created: bool },
    /// 命中已有资产，组件差异已落库
    Reconciled { changes: Vec<ComponentChange> },
    /// sn 是新的但名字撞了已有资产
    NameConflict { name: String },
}

#[derive(Default)]
pub struct ReconcileService {
    // sn -> 串行化锁。上报彼此独立，只有同一 sn 的两步查改需要互斥
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ReconcileService {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub fn lock_for(&self, sn: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(sn.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn reconcile(
        &self,
        db: &DbConn,
        fact: FactRecord,
    ) -> Result<ReconcileOutcome, AppError> {
        let lock = self.lock_for(&fact.sn);
        let _guard = lock.lock().await;
        self.reconcile_locked(db, fact).await
    }

    async fn reconcile_locked(
        &self,
        db: &DbConn,
        fact: FactRecord,
    ) -> Result<ReconcileOutcome, AppError> {
        if let Some(asset) = AssetRepo::find_by_sn(db, &fact.sn).await? {
            return self.apply_to_asset(db, asset, fact).await;
        }

        // 新 sn：名字撞车不自动改名也不合并，记事件等运维处理
        let name = fact.display_name();
        if let Some(existing) = AssetRepo::find_by_name(db, &name).await? {
            let mut entry = event_log::Model::new();
            entry.name = format!("name conflict: {name}");
            entry.asset_id = Some(existing.id.clone());
            entry.event_type = EventType::Other as i32;
            entry.detail = format!(
                "report for new sn `{}` collides with asset `{}` (sn `{}`)",
                fact.sn, name, existing.sn
            );
            EventLogRepo::append(db, entry).await?;
            return Ok(ReconcileOutcome::NameConflict { name });
        }

        match PendingRepo::find_by_sn(db, &fact.sn).await? {
            None => {
                PendingRepo::insert_from_fact(db, &fact).await?;
                Ok(ReconcileOutcome::Queued { created: true })
            }
            // 已批准但尚未晋升完成：让采集端下轮重试，不并发改写
            Some(p) if p.approved => Err(AppError::PromotionInFlight(fact.sn)),
            Some(_) => {
                PendingRepo::refresh_from_fact(db, &fact).await?;
                Ok(ReconcileOutcome::Queued { created: false })
            }
        }
    }

    /// 已知资产的硬件复报：RAM/磁盘/网卡按自然键做差异，CPU 覆盖写，
    /// 子资产的冗余字段刷新，每条变更记一笔事件。
    async fn apply_to_asset(
        &self,
        db: &DbConn,
        asset: asset::Model,
        fact: FactRecord,
    ) -> Result<ReconcileOutcome, AppError> {
        let txn = db.begin().await?;
        let mut changes = Vec::new();

        let stored_ram = ComponentRepo::ram_facts(&txn, &asset.id).await?;
        let ram_diff = diff_components(&stored_ram, &fact.ram);
        ComponentRepo::apply_ram(&txn, &asset.id, &ram_diff).await?;
        changes.extend(describe(ComponentKind::Ram, &ram_diff));

        let stored_disk = ComponentRepo::disk_facts(&txn, &asset.id).await?;
        let disk_diff = diff_components(&stored_disk, &fact.disk);
        ComponentRepo::apply_disk(&txn, &asset.id, &disk_diff).await?;
        changes.extend(describe(ComponentKind::Disk, &disk_diff));

        let stored_nic = ComponentRepo::nic_facts(&txn, &asset.id).await?;
        let nic_diff = diff_components(&stored_nic, &fact.nic);
        ComponentRepo::apply_nic(&txn, &asset.id, &nic_diff).await?;
        changes.extend(describe(ComponentKind::Nic, &nic_diff));

        if let Some(change) = ComponentRepo::upsert_cpu(&txn, &asset.id, &fact).await? {
            changes.push(change);
        }

        SubAssetRepo::refresh_from_fact(&txn, &asset, &fact).await?;

        for change in &changes {
            let entry = EventLogRepo::hardware_entry(&asset.id, &asset.name, change, None);
            EventLogRepo::append(&txn, entry).await?;
        }
        AssetRepo::touch(&txn, &asset.id).await?;

        txn.commit().await?;
        tracing::info!(sn = %fact.sn, changes = changes.len(), "asset reconciled");
        Ok(ReconcileOutcome::Reconciled { changes })
    }
}

fn describe<T>(kind: ComponentKind, diff: &ComponentDiff<T>) -> Vec<ComponentChange>
where
    T: ComponentFact + Serialize,
{
    let mut out = Vec::new();
    for f in &diff.insert {
        out.push(ComponentChange::new(
            kind,
            ChangeAction::Add,
            &f.natural_key(),
            json_detail(f),
        ));
    }
    for f in &diff.update {
        out.push(ComponentChange::new(
            kind,
            ChangeAction::Update,
            &f.natural_key(),
            json_detail(f),
        ));
    }
    for f in &diff.retire {
        out.push(ComponentChange::new(
            kind,
            ChangeAction::Retire,
            &f.natural_key(),
            json_detail(f),
        ));
    }
    out
}

fn json_detail<T: Serialize>(f: &T) -> String {
    serde_json::to_string(f).unwrap_or_default()
}
