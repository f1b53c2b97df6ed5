//! intake pipeline integration tests, sqlite in memory

use std::sync::Arc;

use cmdb_common::{RawBoard, RawDisk, RawNic, RawRam, RawReport};
use cmdb_web::repo::model::{asset, cpu, disk, event_log, nic, pending_asset, ram, server};
use cmdb_web::repo::schema;
use cmdb_web::repo::sea::{AssetRepo, ComponentRepo, PendingRepo};
use cmdb_web::service::approve::{self, PromoteOutcome};
use cmdb_web::service::diff::diff_components;
use cmdb_web::service::fact::{ChangeAction, ComponentKind};
use cmdb_web::service::normalize::normalize;
use cmdb_web::service::reconcile::{ReconcileOutcome, ReconcileService};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter,
};

// 内存库的连接池收到1，串行事务靠池子排队
async fn mem_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1);
    let db = Database::connect(opt).await.unwrap();
    schema::setup(&db).await.unwrap();
    db
}

fn sample_report(sn: &str, hostname: &str) -> RawReport {
    RawReport {
        asset_type: "server".to_string(),
        serial_number: sn.to_string(),
        hostname: hostname.to_string(),
        os_type: "linux".to_string(),
        os_distribution: "Debian".to_string(),
        os_release: "12".to_string(),
        cpu_model: "Xeon E5-2680".to_string(),
        cpu_count: 2,
        cpu_core_count: 24,
        ram: vec![
            RawRam {
                slot: "A1".to_string(),
                capacity: 16,
                model: "DDR4".to_string(),
                manufacturer: "Samsung".to_string(),
                serial: "RAM-A1".to_string(),
            },
            RawRam {
                slot: "A2".to_string(),
                capacity: 16,
                model: "DDR4".to_string(),
                manufacturer: "Samsung".to_string(),
                serial: "RAM-A2".to_string(),
            },
        ],
        disk: vec![RawDisk {
            slot: "0".to_string(),
            serial: "DISK-1".to_string(),
            model: "ST500".to_string(),
            manufacturer: "Seagate".to_string(),
            capacity: 500,
            interface_type: "SATA".to_string(),
        }],
        nic: vec![RawNic {
            name: "eth0".to_string(),
            model: "e1000".to_string(),
            mac: "AA:BB:CC:00:00:01".to_string(),
            ip_address: "10.0.0.5".to_string(),
            net_mask: "255.255.255.0".to_string(),
        }],
        motherboard: RawBoard {
            manufacturer: "Dell".to_string(),
            model: "PowerEdge R740".to_string(),
            wake_up_type: "6".to_string(),
            serial: "BOARD-1".to_string(),
        },
        ..Default::default()
    }
}

async fn pending_count(db: &DatabaseConnection) -> u64 {
    pending_asset::Entity::find().count(db).await.unwrap()
}

#[tokio::test]
async fn first_report_queues_exactly_one_pending() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    let outcome = svc.reconcile(&db, fact).await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::Queued { created: true });
    assert_eq!(pending_count(&db).await, 1);
    let row = PendingRepo::find_by_sn(&db, "SRV-001").await.unwrap().unwrap();
    assert!(!row.approved);
    assert_eq!(row.asset_type, "server");
    assert_eq!(row.ram_size, Some(32));
}

#[tokio::test]
async fn resubmission_overwrites_pending_in_place() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let first = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, first).await.unwrap();

    let mut raw = sample_report("SRV-001", "web-01");
    raw.cpu_model = "Xeon Gold 6338".to_string();
    raw.ram.push(RawRam {
        slot: "B1".to_string(),
        capacity: 32,
        serial: "RAM-B1".to_string(),
        ..Default::default()
    });
    let second = normalize(raw).unwrap();
    let outcome = svc.reconcile(&db, second).await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::Queued { created: false });
    assert_eq!(pending_count(&db).await, 1);
    let row = PendingRepo::find_by_sn(&db, "SRV-001").await.unwrap().unwrap();
    assert_eq!(row.cpu_model.as_deref(), Some("Xeon Gold 6338"));
    assert_eq!(row.ram_size, Some(64));
    assert!(row.data.contains("RAM-B1"));
}

// 同一报文提交两次，只有一行待审批
#[tokio::test]
async fn identical_resubmission_is_idempotent_by_key() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let raw = RawReport {
        asset_type: "server".to_string(),
        serial_number: "ABC123".to_string(),
        ram: vec![RawRam {
            slot: "A1".to_string(),
            capacity: 16,
            ..Default::default()
        }],
        disk: vec![RawDisk {
            serial: "D1".to_string(),
            capacity: 500,
            ..Default::default()
        }],
        ..Default::default()
    };

    let first = svc.reconcile(&db, normalize(raw.clone()).unwrap()).await.unwrap();
    let second = svc.reconcile(&db, normalize(raw).unwrap()).await.unwrap();

    assert_eq!(first, ReconcileOutcome::Queued { created: true });
    assert_eq!(second, ReconcileOutcome::Queued { created: false });
    assert_eq!(pending_count(&db).await, 1);
}

#[tokio::test]
async fn promotion_creates_the_full_asset_graph() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact).await.unwrap();

    let outcome = approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap();
    let PromoteOutcome::Promoted { asset_id } = outcome else {
        panic!("expected Promoted, got {outcome:?}");
    };

    let asset = AssetRepo::get_asset_by_id(&db, &asset_id).await.unwrap();
    assert_eq!(asset.sn, "SRV-001");
    assert_eq!(asset.name, "web-01");
    assert_eq!(asset.status, 0);
    assert_eq!(asset.approved_by.as_deref(), Some("ops-admin"));

    // 类型化子资产 + 组件行
    let srv = server::Entity::find()
        .filter(server::Column::AssetId.eq(asset_id.as_str()))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(srv.os_type.as_deref(), Some("linux"));
    assert_eq!(srv.created_by, "auto");
    assert_eq!(srv.model.as_deref(), Some("PowerEdge R740"));

    let cpu_row = ComponentRepo::find_cpu(&db, &asset_id).await.unwrap().unwrap();
    assert_eq!(cpu_row.cpu_count, 2);
    assert_eq!(ComponentRepo::ram_facts(&db, &asset_id).await.unwrap().len(), 2);
    assert_eq!(ComponentRepo::disk_facts(&db, &asset_id).await.unwrap().len(), 1);
    assert_eq!(ComponentRepo::nic_facts(&db, &asset_id).await.unwrap().len(), 1);

    // 待审批行被消费，上线事件已记
    assert_eq!(pending_count(&db).await, 0);
    let online_events = event_log::Entity::find()
        .filter(event_log::Column::AssetId.eq(asset_id.as_str()))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(online_events.len(), 1);
    assert_eq!(online_events[0].event_type, 4);
}

#[tokio::test]
async fn promoted_asset_rediffed_against_source_fact_is_clean() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact.clone()).await.unwrap();
    let PromoteOutcome::Promoted { asset_id } =
        approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap()
    else {
        panic!("promotion failed");
    };

    let stored_ram = ComponentRepo::ram_facts(&db, &asset_id).await.unwrap();
    let stored_disk = ComponentRepo::disk_facts(&db, &asset_id).await.unwrap();
    let stored_nic = ComponentRepo::nic_facts(&db, &asset_id).await.unwrap();

    assert!(diff_components(&stored_ram, &fact.ram).is_empty());
    assert!(diff_components(&stored_disk, &fact.disk).is_empty());
    assert!(diff_components(&stored_nic, &fact.nic).is_empty());
}

#[tokio::test]
async fn ram_swap_reconciles_as_one_retire_one_insert() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact).await.unwrap();
    approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap();

    // A2 拔掉，B1 插上
    let mut raw = sample_report("SRV-001", "web-01");
    raw.ram.remove(1);
    raw.ram.push(RawRam {
        slot: "B1".to_string(),
        capacity: 32,
        model: "DDR4".to_string(),
        manufacturer: "Samsung".to_string(),
        serial: "RAM-B1".to_string(),
    });
    let incoming = normalize(raw).unwrap();
    let outcome = svc.reconcile(&db, incoming.clone()).await.unwrap();

    let ReconcileOutcome::Reconciled { changes } = outcome else {
        panic!("expected Reconciled, got {outcome:?}");
    };
    let ram_changes: Vec<_> = changes
        .iter()
        .filter(|c| c.kind == ComponentKind::Ram)
        .collect();
    assert_eq!(ram_changes.len(), 2);
    assert!(ram_changes
        .iter()
        .any(|c| c.action == ChangeAction::Add && c.key == "B1"));
    assert!(ram_changes
        .iter()
        .any(|c| c.action == ChangeAction::Retire && c.key == "A2"));
    assert!(!ram_changes.iter().any(|c| c.action == ChangeAction::Update));

    // 落库集合与汇报集合一致
    let asset = AssetRepo::find_by_sn(&db, "SRV-001").await.unwrap().unwrap();
    let stored = ComponentRepo::ram_facts(&db, &asset.id).await.unwrap();
    assert!(diff_components(&stored, &incoming.ram).is_empty());

    // 每条变更都有事件：1条上线 + 2条硬件变更
    let events = event_log::Entity::find()
        .filter(event_log::Column::AssetId.eq(asset.id.as_str()))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn promotion_is_exactly_once_under_concurrency() {
    let db = mem_db().await;
    let svc = Arc::new(ReconcileService::new());

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact).await.unwrap();

    let (db_a, svc_a) = (db.clone(), svc.clone());
    let a = tokio::spawn(async move {
        approve::promote(&db_a, &svc_a, "SRV-001", "ops-a").await.unwrap()
    });
    let (db_b, svc_b) = (db.clone(), svc.clone());
    let b = tokio::spawn(async move {
        approve::promote(&db_b, &svc_b, "SRV-001", "ops-b").await.unwrap()
    });

    let (ra, rb) = (a.await.unwrap(), b.await.unwrap());
    let promoted = [&ra, &rb]
        .iter()
        .filter(|o| matches!(o, PromoteOutcome::Promoted { .. }))
        .count();
    let noop = [&ra, &rb]
        .iter()
        .filter(|o| matches!(o, PromoteOutcome::AlreadyPromoted))
        .count();
    assert_eq!(promoted, 1);
    assert_eq!(noop, 1);
    assert_eq!(asset::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn repeated_approval_is_an_idempotent_noop() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact).await.unwrap();

    let first = approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap();
    let second = approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap();
    assert!(matches!(first, PromoteOutcome::Promoted { .. }));
    assert_eq!(second, PromoteOutcome::AlreadyPromoted);
}

#[tokio::test]
async fn deep_delete_cascades_and_detaches_events() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact).await.unwrap();
    let PromoteOutcome::Promoted { asset_id } =
        approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap()
    else {
        panic!("promotion failed");
    };

    AssetRepo::delete_deep(&db, &asset_id).await.unwrap();

    assert_eq!(asset::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(server::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(cpu::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(ram::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(disk::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(nic::Entity::find().count(&db).await.unwrap(), 0);

    // 事件留档，资产引用置空
    let events = event_log::Entity::find().all(&db).await.unwrap();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.asset_id.is_none()));
}

#[tokio::test]
async fn name_collision_on_new_serial_is_surfaced() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact).await.unwrap();
    approve::promote(&db, &svc, "SRV-001", "ops-admin").await.unwrap();

    // 不同 sn 报了同一个主机名
    let clash = normalize(sample_report("SRV-002", "web-01")).unwrap();
    let outcome = svc.reconcile(&db, clash).await.unwrap();
    assert_eq!(
        outcome,
        ReconcileOutcome::NameConflict {
            name: "web-01".to_string()
        }
    );
    // 没有悄悄排队
    assert_eq!(pending_count(&db).await, 0);
}

#[tokio::test]
async fn report_during_inflight_promotion_is_rejected_as_retryable() {
    let db = mem_db().await;
    let svc = ReconcileService::new();

    let fact = normalize(sample_report("SRV-001", "web-01")).unwrap();
    svc.reconcile(&db, fact.clone()).await.unwrap();
    // 审批标记已写、晋升尚未完成的窗口
    PendingRepo::mark_approved(&db, "SRV-001").await.unwrap();

    let err = svc.reconcile(&db, fact).await.unwrap_err();
    assert!(matches!(
        err,
        cmdb_web::error::AppError::PromotionInFlight(_)
    ));
}
