//! report delivery

use std::time::Duration;

use cmdb_common::RawReport;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AgentConfig;

pub struct Reporter {
    url: String,
    client: reqwest::Client,
}

impl Reporter {
    pub fn new(config: &AgentConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout))
            .build()?;
        Ok(Self {
            url: config.server.report_url(),
            client,
        })
    }

    pub async fn send(&self, report: &RawReport) -> anyhow::Result<()> {
        let resp = self.client.post(&self.url).json(report).send().await?;
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let result = body
            .get("data")
            .and_then(|d| d.get("result"))
            .and_then(|r| r.as_str())
            .unwrap_or_default()
            .to_string();
        match status {
            s if s.is_success() => {
                info!(%result, "report accepted");
                Ok(())
            }
            // 晋升窗口内的撞车，下轮定时上报自然重试
            StatusCode::CONFLICT => {
                warn!(%body, "report deferred by server, will retry next run");
                Ok(())
            }
            s => anyhow::bail!("report rejected: {s} {body}"),
        }
    }
}
