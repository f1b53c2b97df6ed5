//! fact probes
//!
//! 系统信息收集器接口。上报契约(字段、单位)在 cmdb-common 里定义，
//! 每个平台一个实现；不支持的平台直接报错，由调度方决定处置。

use async_trait::async_trait;
use cmdb_common::RawReport;

#[cfg(target_os = "linux")]
mod linux;

#[async_trait]
pub trait FactProbe: Send + Sync {
    /// 收集一次硬件/系统信息
    async fn collect(&self) -> anyhow::Result<RawReport>;
}

pub fn platform_probe() -> anyhow::Result<Box<dyn FactProbe>> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux::LinuxProbe::new()))
    }
    #[cfg(not(target_os = "linux"))]
    {
        anyhow::bail!("no fact probe for this platform")
    }
}
