//! config

mod alias;

pub use alias::*;

use std::path::Path;

use crate::config::Db::Sqlite;
use crate::error::AppError;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(rename = "db")]
    pub db_config: Db,
    #[serde(rename = "tracing")]
    pub tracing: Option<TracingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub enum Db {
    #[serde(rename = "mysql")]
    Mysql(MysqlConfig),
    #[serde(rename = "sqlite")]
    Sqlite(SqliteConfig),
}

impl Default for Db {
    fn default() -> Self {
        Sqlite(SqliteConfig {
            path: "cmdb.sqlite".to_string(),
        })
    }
}

impl Db {
    pub fn connect_url(&self) -> String {
        match self {
            Db::Mysql(c) => c.connect_url(),
            Db::Sqlite(c) => c.connect_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub addr: String,
    pub port: String,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TracingConfig {
    pub filter: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct MysqlConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl MysqlConfig {
    pub fn connect_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}/{}",
            self.username, self.password, self.host, self.database
        )
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqliteConfig {
    pub path: String,
}

impl SqliteConfig {
    pub fn connect_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

// parse config
pub fn parse_config(path: &Path) -> Result<AppConfig, AppError> {
    tracing::debug!("parse config from path: {:}", path.display());
    let data = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read `{}`: {e}", path.display())))?;
    let config: AppConfig =
        toml::from_str(&data).map_err(|e| AppError::Config(format!("parse config: {e}")))?;
    info!("config:{:?}", config);
    Ok(config)
}
