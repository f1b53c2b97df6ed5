//! em
//!
//! 资产/事件相关枚举。DB 里资产类型存字符串、状态和事件类型存整型，
//! 枚举负责两侧的转换。

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString, FromRepr};

/// Asset categories accepted from collectors and manual entry.
///
/// The legacy flat spellings (`networkdevice`, ...) parse too because the
/// shipped Windows collector still emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    #[strum(to_string = "server")]
    Server,
    #[strum(to_string = "network-device", serialize = "networkdevice")]
    NetworkDevice,
    #[strum(to_string = "storage-device", serialize = "storagedevice")]
    StorageDevice,
    #[strum(to_string = "security-device", serialize = "securitydevice")]
    SecurityDevice,
    #[strum(to_string = "software")]
    Software,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, FromRepr)]
#[repr(i32)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Online = 0,
    Offline = 1,
    Unknown = 2,
    Faulty = 3,
    Standby = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, FromRepr)]
#[repr(i32)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EventType {
    Other = 0,
    HardwareChange = 1,
    NewComponent = 2,
    Offline = 3,
    Online = 4,
    Maintenance = 5,
}

/// 磁盘接口类型，未识别的一律归为 unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
pub enum DiskInterface {
    #[strum(to_string = "SATA")]
    Sata,
    #[strum(to_string = "SAS")]
    Sas,
    #[strum(to_string = "SCSI")]
    Scsi,
    #[strum(to_string = "M.2")]
    M2,
    #[strum(to_string = "unknown")]
    Unknown,
}

impl DiskInterface {
    /// Lenient parse used by the normalizer: collectors report best-effort
    /// strings scraped out of model names.
    pub fn parse_lenient(raw: &str) -> DiskInterface {
        raw.trim().parse().unwrap_or(DiskInterface::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn asset_type_round_trip() {
        assert_eq!(AssetType::from_str("server").unwrap(), AssetType::Server);
        assert_eq!(
            AssetType::from_str("network-device").unwrap(),
            AssetType::NetworkDevice
        );
        // legacy collector spelling
        assert_eq!(
            AssetType::from_str("networkdevice").unwrap(),
            AssetType::NetworkDevice
        );
        assert_eq!(AssetType::NetworkDevice.as_ref(), "network-device");
        assert!(AssetType::from_str("toaster").is_err());
    }

    #[test]
    fn status_from_repr() {
        assert_eq!(AssetStatus::from_repr(0), Some(AssetStatus::Online));
        assert_eq!(AssetStatus::from_repr(4), Some(AssetStatus::Standby));
        assert_eq!(AssetStatus::from_repr(9), None);
    }

    #[test]
    fn disk_interface_lenient() {
        assert_eq!(DiskInterface::parse_lenient("SATA"), DiskInterface::Sata);
        assert_eq!(DiskInterface::parse_lenient(""), DiskInterface::Unknown);
        assert_eq!(DiskInterface::parse_lenient("IDE"), DiskInterface::Unknown);
    }
}
