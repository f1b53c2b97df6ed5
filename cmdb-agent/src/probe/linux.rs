//! linux probe
//!
//! /proc、/sys/class/dmi、/sys/block 直读；内存条明细来自 dmidecode
//! (需要 root)，跑不起来就只报整机内存。容量统一折算成整 GB 再上报。

use std::collections::BTreeSet;
use std::fs;
use std::process::Command;

use async_trait::async_trait;
use cmdb_common::{RawBoard, RawDisk, RawNic, RawRam, RawReport};

use super::FactProbe;

const GB: u64 = 1024 * 1024 * 1024;

pub struct LinuxProbe;

impl LinuxProbe {
    pub fn new() -> Self {
        LinuxProbe
    }
}

#[async_trait]
impl FactProbe for LinuxProbe {
    async fn collect(&self) -> anyhow::Result<RawReport> {
        let serial_number = machine_serial();
        if serial_number.is_empty() {
            anyhow::bail!("could not determine a machine serial, refusing to report");
        }
        let (os_distribution, os_release) = parse_os_release(&read_or_default("/etc/os-release"));
        let cpu = parse_cpuinfo(&read_or_default("/proc/cpuinfo"));
        Ok(RawReport {
            asset_type: "server".to_string(),
            serial_number,
            hostname: hostname::get()
                .ok()
                .and_then(|s| s.into_string().ok())
                .unwrap_or_default(),
            os_type: "linux".to_string(),
            os_distribution,
            os_release,
            cpu_model: cpu.model,
            cpu_count: cpu.sockets,
            cpu_core_count: cpu.cores,
            ram_total_size: parse_meminfo_gb(&read_or_default("/proc/meminfo")),
            ram: collect_ram(),
            disk: collect_disks(),
            nic: collect_nics(),
            motherboard: collect_board(),
        })
    }
}

fn read_or_default(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

fn read_trimmed(path: &str) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// 机器序列号：dmi 产品序列号优先，虚拟机退回 product_uuid，
/// 再不行用 machine-id 兜底，保证上报契约里 sn 非空。
fn machine_serial() -> String {
    for path in [
        "/sys/class/dmi/id/product_serial",
        "/sys/class/dmi/id/product_uuid",
        "/etc/machine-id",
    ] {
        let value = read_trimmed(path);
        if !value.is_empty() && value != "None" {
            return value;
        }
    }
    String::new()
}

fn collect_board() -> RawBoard {
    RawBoard {
        manufacturer: read_trimmed("/sys/class/dmi/id/board_vendor"),
        model: read_trimmed("/sys/class/dmi/id/board_name"),
        wake_up_type: String::new(),
        serial: read_trimmed("/sys/class/dmi/id/board_serial"),
    }
}

pub(crate) struct CpuSummary {
    pub model: String,
    pub sockets: u32,
    pub cores: u32,
}

pub(crate) fn parse_cpuinfo(raw: &str) -> CpuSummary {
    let mut model = String::new();
    let mut physical_ids = BTreeSet::new();
    let mut cores_per_socket = 0u32;
    let mut processors = 0u32;
    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "model name" if model.is_empty() => model = value.to_string(),
            "physical id" => {
                physical_ids.insert(value.to_string());
            }
            "cpu cores" if cores_per_socket == 0 => {
                cores_per_socket = value.parse().unwrap_or(0)
            }
            "processor" => processors += 1,
            _ => {}
        }
    }
    let sockets = physical_ids.len().max(1) as u32;
    let cores = if cores_per_socket > 0 {
        cores_per_socket * sockets
    } else {
        processors
    };
    CpuSummary {
        model,
        sockets,
        cores,
    }
}

pub(crate) fn parse_meminfo_gb(raw: &str) -> i64 {
    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            let kb: u64 = rest
                .trim()
                .trim_end_matches("kB")
                .trim()
                .parse()
                .unwrap_or(0);
            return (kb * 1024 / GB) as i64;
        }
    }
    0
}

pub(crate) fn parse_os_release(raw: &str) -> (String, String) {
    let mut name = String::new();
    let mut version = String::new();
    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix("NAME=") {
            name = rest.trim_matches('"').to_string();
        } else if let Some(rest) = line.strip_prefix("VERSION=") {
            version = rest.trim_matches('"').to_string();
        }
    }
    (name, version)
}

fn collect_ram() -> Vec<RawRam> {
    match Command::new("dmidecode").args(["-t", "memory"]).output() {
        Ok(out) if out.status.success() => {
            parse_dmidecode_memory(&String::from_utf8_lossy(&out.stdout))
        }
        _ => {
            tracing::debug!("dmidecode unavailable, skipping per-slot ram facts");
            Vec::new()
        }
    }
}

/// dmidecode type-17 输出：一个 "Memory Device" 一条内存,
/// 空槽位(Size: No Module Installed)跳过
pub(crate) fn parse_dmidecode_memory(raw: &str) -> Vec<RawRam> {
    let mut out = Vec::new();
    let mut current: Option<RawRam> = None;
    let mut size_gb = 0i64;
    for line in raw.lines() {
        if line.starts_with("Memory Device") {
            if let Some(ram) = current.take() {
                if size_gb > 0 && !ram.slot.is_empty() {
                    out.push(RawRam {
                        capacity: size_gb,
                        ..ram
                    });
                }
            }
            current = Some(RawRam::default());
            size_gb = 0;
            continue;
        }
        let Some(ram) = current.as_mut() else {
            continue;
        };
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        match key {
            "Size" => {
                size_gb = if let Some(n) = value.strip_suffix(" GB") {
                    n.trim().parse().unwrap_or(0)
                } else if let Some(n) = value.strip_suffix(" MB") {
                    n.trim().parse::<i64>().unwrap_or(0) / 1024
                } else {
                    0
                };
            }
            "Locator" => ram.slot = value.to_string(),
            "Manufacturer" => ram.manufacturer = value.to_string(),
            "Part Number" => ram.model = value.to_string(),
            "Serial Number" => ram.serial = value.to_string(),
            _ => {}
        }
    }
    if let Some(ram) = current.take() {
        if size_gb > 0 && !ram.slot.is_empty() {
            out.push(RawRam {
                capacity: size_gb,
                ..ram
            });
        }
    }
    out
}

fn collect_disks() -> Vec<RawDisk> {
    let Ok(entries) = fs::read_dir("/sys/block") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if ["loop", "ram", "zram", "dm-", "sr", "md"]
            .iter()
            .any(|p| name.starts_with(p))
        {
            continue;
        }
        let base = format!("/sys/block/{name}");
        let serial = read_trimmed(&format!("{base}/device/serial"));
        if serial.is_empty() {
            // 契约要求磁盘必须有自然键，拿不到序列号的设备不报
            tracing::debug!(disk = %name, "no serial exposed, skipping");
            continue;
        }
        let sectors: u64 = read_trimmed(&format!("{base}/size")).parse().unwrap_or(0);
        let model = read_trimmed(&format!("{base}/device/model"));
        out.push(RawDisk {
            slot: name,
            serial,
            interface_type: interface_from_model(&model),
            model,
            manufacturer: read_trimmed(&format!("{base}/device/vendor")),
            capacity: (sectors * 512 / GB) as i64,
        });
    }
    out
}

pub(crate) fn interface_from_model(model: &str) -> String {
    for interface in ["SAS", "SCSI", "SATA", "M.2"] {
        if model.contains(interface) {
            return interface.to_string();
        }
    }
    "unknown".to_string()
}

fn collect_nics() -> Vec<RawNic> {
    let Ok(addrs) = if_addrs::get_if_addrs() else {
        return Vec::new();
    };
    let mut out: Vec<RawNic> = Vec::new();
    for ifa in addrs.into_iter().filter(|i| !i.is_loopback()) {
        let mac = read_trimmed(&format!("/sys/class/net/{}/address", ifa.name));
        if mac.is_empty() {
            continue;
        }
        let (ip_address, net_mask) = match &ifa.addr {
            if_addrs::IfAddr::V4(v4) => (v4.ip.to_string(), v4.netmask.to_string()),
            _ => continue,
        };
        // 一块网卡可能挂多个地址，第一个 v4 为准
        if out.iter().any(|n| n.name == ifa.name) {
            continue;
        }
        out.push(RawNic {
            model: driver_name(&ifa.name),
            name: ifa.name,
            mac,
            ip_address,
            net_mask,
        });
    }
    out
}

fn driver_name(ifname: &str) -> String {
    let link = format!("/sys/class/net/{ifname}/device/driver");
    fs::read_link(&link)
        .ok()
        .and_then(|p| {
            p.file_name()
                .map(|f| f.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "virtual".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpuinfo_dual_socket() {
        let raw = "\
processor\t: 0
model name\t: Intel(R) Xeon(R) CPU E5-2680 v3
physical id\t: 0
cpu cores\t: 12
processor\t: 1
model name\t: Intel(R) Xeon(R) CPU E5-2680 v3
physical id\t: 1
cpu cores\t: 12
";
        let cpu = parse_cpuinfo(raw);
        assert_eq!(cpu.model, "Intel(R) Xeon(R) CPU E5-2680 v3");
        assert_eq!(cpu.sockets, 2);
        assert_eq!(cpu.cores, 24);
    }

    #[test]
    fn cpuinfo_without_physical_id_falls_back() {
        let raw = "processor\t: 0\nmodel name\t: ARMv8\nprocessor\t: 1\n";
        let cpu = parse_cpuinfo(raw);
        assert_eq!(cpu.sockets, 1);
        assert_eq!(cpu.cores, 2);
    }

    #[test]
    fn meminfo_rounds_down_to_gb() {
        assert_eq!(parse_meminfo_gb("MemTotal:       16315584 kB\n"), 15);
        assert_eq!(parse_meminfo_gb(""), 0);
    }

    #[test]
    fn os_release_fields() {
        let raw = "NAME=\"Debian GNU/Linux\"\nVERSION=\"12 (bookworm)\"\nID=debian\n";
        let (name, version) = parse_os_release(raw);
        assert_eq!(name, "Debian GNU/Linux");
        assert_eq!(version, "12 (bookworm)");
    }

    #[test]
    fn dmidecode_skips_empty_slots() {
        let raw = "\
Memory Device
\tSize: 16 GB
\tLocator: DIMM_A1
\tManufacturer: Samsung
\tSerial Number: 12345678
\tPart Number: M393A2G40DB1
Memory Device
\tSize: No Module Installed
\tLocator: DIMM_A2
";
        let sticks = parse_dmidecode_memory(raw);
        assert_eq!(sticks.len(), 1);
        assert_eq!(sticks[0].slot, "DIMM_A1");
        assert_eq!(sticks[0].capacity, 16);
        assert_eq!(sticks[0].serial, "12345678");
    }

    #[test]
    fn dmidecode_mb_sizes_convert() {
        let raw = "Memory Device\n\tSize: 8192 MB\n\tLocator: DIMM 0\n";
        let sticks = parse_dmidecode_memory(raw);
        assert_eq!(sticks[0].capacity, 8);
    }

    #[test]
    fn interface_type_scraped_from_model() {
        assert_eq!(interface_from_model("SATA SSD 860"), "SATA");
        assert_eq!(interface_from_model("PERC H730"), "unknown");
    }
}
