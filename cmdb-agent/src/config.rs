//! agent config

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub server: ReportTarget,
}

/// 远端接收数据的服务器
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTarget {
    pub addr: String,
    pub port: u16,
    #[serde(default = "cmdb_common::_default_report_path")]
    pub path: String,
    #[serde(default = "cmdb_common::_default_request_timeout")]
    pub request_timeout: u64,
}

impl ReportTarget {
    pub fn report_url(&self) -> String {
        format!("http://{}:{}{}", self.addr, self.port, self.path)
    }
}

pub fn parse_config(path: &Path) -> anyhow::Result<AgentConfig> {
    let data = std::fs::read_to_string(path)?;
    let config: AgentConfig = toml::from_str(&data)?;
    tracing::debug!("config:{:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_path_and_timeout() {
        let config: AgentConfig = toml::from_str(
            r#"
            [server]
            addr = "192.168.0.100"
            port = 8000
            "#,
        )
        .unwrap();
        assert_eq!(
            config.server.report_url(),
            "http://192.168.0.100:8000/api/asset/report"
        );
        assert_eq!(config.server.request_timeout, 30);
    }
}
