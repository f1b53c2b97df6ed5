//! report payload contract
//!
//! One `RawReport` per collector run. Field names follow the wire contract;
//! everything is defaulted so that a sparse report deserializes and the
//! server-side normalizer decides what is actually missing. `assert_type` and
//! `sn` aliases keep already-deployed collectors readable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReport {
    #[serde(alias = "assert_type")]
    pub asset_type: String,
    #[serde(alias = "sn")]
    pub serial_number: String,
    pub hostname: String,
    pub os_type: String,
    pub os_distribution: String,
    pub os_release: String,
    pub cpu_model: String,
    pub cpu_count: u32,
    pub cpu_core_count: u32,
    /// 整机内存大小(GB)
    pub ram_total_size: i64,
    #[serde(alias = "RAM")]
    pub ram: Vec<RawRam>,
    #[serde(alias = "physical_disk_driver")]
    pub disk: Vec<RawDisk>,
    pub nic: Vec<RawNic>,
    pub motherboard: RawBoard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRam {
    pub slot: String,
    /// 内存大小(GB)
    pub capacity: i64,
    pub model: String,
    pub manufacturer: String,
    #[serde(alias = "sn")]
    pub serial: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDisk {
    pub slot: String,
    #[serde(alias = "sn")]
    pub serial: String,
    pub model: String,
    pub manufacturer: String,
    /// 磁盘容量(GB)
    pub capacity: i64,
    pub interface_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNic {
    pub name: String,
    pub model: String,
    pub mac: String,
    pub ip_address: String,
    pub net_mask: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBoard {
    pub manufacturer: String,
    pub model: String,
    pub wake_up_type: String,
    #[serde(alias = "sn")]
    pub serial: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let body = r#"{
            "assert_type": "server",
            "sn": "SRV-001",
            "RAM": [{"slot": "DIMM 0", "capacity": 16, "sn": "R1"}],
            "physical_disk_driver": [{"sn": "D1", "capacity": 500}]
        }"#;
        let report: RawReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.asset_type, "server");
        assert_eq!(report.serial_number, "SRV-001");
        assert_eq!(report.ram[0].serial, "R1");
        assert_eq!(report.disk[0].capacity, 500);
    }

    #[test]
    fn sparse_report_fills_defaults() {
        let report: RawReport = serde_json::from_str(r#"{"serial_number": "X"}"#).unwrap();
        assert!(report.ram.is_empty());
        assert_eq!(report.cpu_count, 0);
        assert_eq!(report.motherboard.serial, "");
    }
}
