//! normalized fact record
//!
//! `FactRecord` is what one collector run boils down to after validation:
//! the shape the reconciliation engine works with and the shape stored in
//! `pending_asset.data` until approval.

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::common::AssetType;
use crate::service::diff::ComponentFact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    pub asset_type: AssetType,
    pub sn: String,
    pub hostname: String,
    pub os_type: String,
    pub os_distribution: String,
    pub os_release: String,
    pub cpu_model: String,
    pub cpu_count: u32,
    pub cpu_core_count: u32,
    pub ram_total_size: i64,
    pub ram: Vec<RamFact>,
    pub disk: Vec<DiskFact>,
    pub nic: Vec<NicFact>,
    pub board: BoardFact,
}

impl FactRecord {
    /// 资产名：优先主机名，裸报文退回 sn
    pub fn display_name(&self) -> String {
        if self.hostname.is_empty() {
            self.sn.clone()
        } else {
            self.hostname.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamFact {
    pub slot: String,
    pub capacity: i64,
    pub model: String,
    pub manufacturer: String,
    pub sn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskFact {
    pub sn: String,
    pub slot: String,
    pub model: String,
    pub manufacturer: String,
    pub capacity: i64,
    pub interface_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NicFact {
    pub name: String,
    pub model: String,
    pub mac: String,
    pub ip_address: String,
    pub net_mask: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardFact {
    pub manufacturer: String,
    pub model: String,
    pub wake_up_type: String,
    pub sn: String,
}

impl ComponentFact for RamFact {
    fn natural_key(&self) -> String {
        self.slot.clone()
    }
    fn fields_eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.model == other.model
            && self.manufacturer == other.manufacturer
            && self.sn == other.sn
    }
}

impl ComponentFact for DiskFact {
    fn natural_key(&self) -> String {
        self.sn.clone()
    }
    fn fields_eq(&self, other: &Self) -> bool {
        self.slot == other.slot
            && self.model == other.model
            && self.manufacturer == other.manufacturer
            && self.capacity == other.capacity
            && self.interface_type == other.interface_type
    }
}

impl ComponentFact for NicFact {
    // 虚拟网卡可能共用占位 mac，键里带上型号
    fn natural_key(&self) -> String {
        format!("{}|{}", self.model, self.mac)
    }
    fn fields_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ip_address == other.ip_address
            && self.net_mask == other.net_mask
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComponentKind {
    Cpu,
    Ram,
    Disk,
    Nic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeAction {
    Add,
    Update,
    Retire,
}

/// One detected component change, reported back to the collector and
/// written to the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentChange {
    pub kind: ComponentKind,
    pub action: ChangeAction,
    pub key: String,
    pub detail: String,
}

impl ComponentChange {
    pub fn new(kind: ComponentKind, action: ChangeAction, key: &str, detail: String) -> Self {
        Self {
            kind,
            action,
            key: key.to_string(),
            detail,
        }
    }
}
