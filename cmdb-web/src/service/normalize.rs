//! payload normalizer
//!
//! Pure transform from the wire-level `RawReport` into a validated
//! `FactRecord`. Units are the collector's problem (capacities arrive in
//! whole GB and are only range-checked here); identity is ours: a report
//! without a serial number or with an unknown asset type never reaches the
//! reconciliation engine.

use std::collections::BTreeMap;
use std::str::FromStr;

use cmdb_common::{RawDisk, RawNic, RawRam, RawReport};

use crate::common::{AssetType, DiskInterface};
use crate::error::AppError;
use crate::service::fact::{BoardFact, DiskFact, FactRecord, NicFact, RamFact};

pub fn normalize(raw: RawReport) -> Result<FactRecord, AppError> {
    let sn = raw.serial_number.trim().to_string();
    if sn.is_empty() {
        return Err(AppError::InvalidPayload(
            "serial_number is required".to_string(),
        ));
    }
    let asset_type = AssetType::from_str(raw.asset_type.trim().to_lowercase().as_str())
        .map_err(|_| {
            AppError::InvalidPayload(format!("unknown asset_type `{}`", raw.asset_type))
        })?;
    if raw.ram_total_size < 0 {
        return Err(AppError::InvalidPayload(
            "ram_total_size must be >= 0".to_string(),
        ));
    }

    let ram = normalize_ram(raw.ram)?;
    let disk = normalize_disk(raw.disk)?;
    let nic = normalize_nic(raw.nic)?;

    // 报文没给整机内存就按内存条求和
    let ram_total_size = if raw.ram_total_size > 0 {
        raw.ram_total_size
    } else {
        ram.iter().map(|r| r.capacity).sum()
    };

    Ok(FactRecord {
        asset_type,
        sn,
        hostname: raw.hostname.trim().to_string(),
        os_type: raw.os_type.trim().to_string(),
        os_distribution: raw.os_distribution.trim().to_string(),
        os_release: raw.os_release.trim().to_string(),
        cpu_model: raw.cpu_model.trim().to_string(),
        cpu_count: raw.cpu_count,
        cpu_core_count: raw.cpu_core_count,
        ram_total_size,
        ram,
        disk,
        nic,
        board: BoardFact {
            manufacturer: raw.motherboard.manufacturer.trim().to_string(),
            model: raw.motherboard.model.trim().to_string(),
            wake_up_type: raw.motherboard.wake_up_type.trim().to_string(),
            sn: raw.motherboard.serial.trim().to_string(),
        },
    })
}

/// Dedup by natural key keeping the last occurrence: a malformed collector
/// emitting the same slot twice must not blow up the (asset, slot) unique.
fn dedup_last<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut keyed = BTreeMap::new();
    for item in items {
        keyed.insert(key(&item), item);
    }
    keyed.into_values().collect()
}

fn normalize_ram(items: Vec<RawRam>) -> Result<Vec<RamFact>, AppError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let slot = item.slot.trim().to_string();
        if slot.is_empty() {
            return Err(AppError::InvalidPayload(
                "ram entry is missing its slot".to_string(),
            ));
        }
        if item.capacity < 0 {
            return Err(AppError::InvalidPayload(format!(
                "ram slot `{slot}` has negative capacity"
            )));
        }
        out.push(RamFact {
            slot,
            capacity: item.capacity,
            model: item.model.trim().to_string(),
            manufacturer: item.manufacturer.trim().to_string(),
            sn: item.serial.trim().to_string(),
        });
    }
    Ok(dedup_last(out, |r| r.slot.clone()))
}

fn normalize_disk(items: Vec<RawDisk>) -> Result<Vec<DiskFact>, AppError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let sn = item.serial.trim().to_string();
        if sn.is_empty() {
            return Err(AppError::InvalidPayload(
                "disk entry is missing its serial".to_string(),
            ));
        }
        if item.capacity < 0 {
            return Err(AppError::InvalidPayload(format!(
                "disk `{sn}` has negative capacity"
            )));
        }
        out.push(DiskFact {
            sn,
            slot: item.slot.trim().to_string(),
            model: item.model.trim().to_string(),
            manufacturer: item.manufacturer.trim().to_string(),
            capacity: item.capacity,
            interface_type: DiskInterface::parse_lenient(&item.interface_type)
                .as_ref()
                .to_string(),
        });
    }
    Ok(dedup_last(out, |d| d.sn.clone()))
}

fn normalize_nic(items: Vec<RawNic>) -> Result<Vec<NicFact>, AppError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let mac = item.mac.trim().to_uppercase();
        if mac.is_empty() {
            return Err(AppError::InvalidPayload(
                "nic entry is missing its mac".to_string(),
            ));
        }
        out.push(NicFact {
            name: item.name.trim().to_string(),
            model: item.model.trim().to_string(),
            mac,
            ip_address: item.ip_address.trim().to_string(),
            net_mask: item.net_mask.trim().to_string(),
        });
    }
    // 同一次汇报里 mac 唯一，后出现的覆盖先出现的
    Ok(dedup_last(out, |n| n.mac.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdb_common::RawBoard;

    fn base_report() -> RawReport {
        RawReport {
            asset_type: "server".to_string(),
            serial_number: "SRV-001".to_string(),
            hostname: "web-01".to_string(),
            os_type: "linux".to_string(),
            cpu_model: "Xeon".to_string(),
            cpu_count: 2,
            cpu_core_count: 16,
            ram: vec![RawRam {
                slot: "DIMM 0".to_string(),
                capacity: 16,
                serial: "R1".to_string(),
                ..Default::default()
            }],
            disk: vec![RawDisk {
                serial: "D1".to_string(),
                capacity: 500,
                interface_type: "SATA".to_string(),
                ..Default::default()
            }],
            nic: vec![RawNic {
                mac: "aa:bb:cc:dd:ee:ff".to_string(),
                model: "e1000".to_string(),
                ..Default::default()
            }],
            motherboard: RawBoard {
                manufacturer: "Dell".to_string(),
                serial: "B-1".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn valid_report_normalizes() {
        let fact = normalize(base_report()).unwrap();
        assert_eq!(fact.sn, "SRV-001");
        assert_eq!(fact.asset_type, AssetType::Server);
        // total derived from the sticks when the payload omits it
        assert_eq!(fact.ram_total_size, 16);
        assert_eq!(fact.nic[0].mac, "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn missing_serial_is_rejected() {
        let mut raw = base_report();
        raw.serial_number = "  ".to_string();
        assert!(matches!(
            normalize(raw),
            Err(AppError::InvalidPayload(_))
        ));
    }

    #[test]
    fn unknown_asset_type_is_rejected() {
        let mut raw = base_report();
        raw.asset_type = "mainframe".to_string();
        assert!(matches!(
            normalize(raw),
            Err(AppError::InvalidPayload(_))
        ));
    }

    #[test]
    fn component_without_natural_key_is_rejected() {
        let mut raw = base_report();
        raw.disk.push(RawDisk {
            capacity: 1000,
            ..Default::default()
        });
        assert!(matches!(
            normalize(raw),
            Err(AppError::InvalidPayload(_))
        ));
    }

    #[test]
    fn duplicate_slots_keep_last_occurrence() {
        let mut raw = base_report();
        raw.ram.push(RawRam {
            slot: "DIMM 0".to_string(),
            capacity: 32,
            serial: "R2".to_string(),
            ..Default::default()
        });
        let fact = normalize(raw).unwrap();
        assert_eq!(fact.ram.len(), 1);
        assert_eq!(fact.ram[0].capacity, 32);
        assert_eq!(fact.ram[0].sn, "R2");
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let mut raw = base_report();
        raw.ram[0].capacity = -1;
        assert!(matches!(
            normalize(raw),
            Err(AppError::InvalidPayload(_))
        ));
    }

    #[test]
    fn explicit_ram_total_wins_over_sum() {
        let mut raw = base_report();
        raw.ram_total_size = 64;
        let fact = normalize(raw).unwrap();
        assert_eq!(fact.ram_total_size, 64);
    }

    #[test]
    fn unknown_disk_interface_downgrades_to_unknown() {
        let mut raw = base_report();
        raw.disk[0].interface_type = "IDE".to_string();
        let fact = normalize(raw).unwrap();
        assert_eq!(fact.disk[0].interface_type, "unknown");
    }
}
