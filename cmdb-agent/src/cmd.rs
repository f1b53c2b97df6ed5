//! cmd

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct AgentCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Parser)]
pub enum Commands {
    /// 采集一次硬件信息并上报服务端(由外部定时器周期调起)
    #[command(name = "report")]
    Report {
        #[arg(long, short, value_parser = verify_input_file, default_value = "agent.toml", action=ArgAction::Set)]
        config: PathBuf,
        /// 只打印报文不上报
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
}

// 配置文件校验
fn verify_input_file(input: &str) -> anyhow::Result<PathBuf> {
    let pb = PathBuf::from(input);
    if pb.exists() {
        anyhow::Ok(pb)
    } else {
        anyhow::bail!("config file is not exist")
    }
}
