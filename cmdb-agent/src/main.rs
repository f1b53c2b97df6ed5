use clap::Parser;

mod client;
mod cmd;
mod config;
mod probe;

use cmd::{AgentCli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // step1. parse cli
    let cli = AgentCli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    match cli.command {
        Commands::Report { config, dry_run } => {
            let config = config::parse_config(&config)?;
            // step2. collect facts
            let probe = probe::platform_probe()?;
            let report = probe.collect().await?;
            tracing::info!(sn = %report.serial_number, "facts collected");
            // step3. deliver
            if dry_run {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            client::Reporter::new(&config)?.send(&report).await?;
        }
    }
    Ok(())
}
