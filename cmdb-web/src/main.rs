use clap::Parser;
use cmdb_web::config::init_app_state;
use cmdb_web::{adapter, cmd::*, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // step1. parse cli
    let cli = CmdbCli::parse();
    match cli.command {
        Commands::Run { config } => {
            // set config
            let config = config::parse_config(&config)?;
            // error level
            let mut filter = tracing_subscriber::EnvFilter::from_default_env();
            // convert config
            if let Some(tracing) = &config.tracing {
                for x in tracing.filter.split(",") {
                    filter = filter.add_directive(x.parse()?);
                }
            }
            // register
            tracing_subscriber::fmt().with_env_filter(filter).init();
            // init state
            let state = init_app_state(&config).await?;
            // step2. start web
            adapter::http::server::start_http_server(&config, state).await?;
        }
    }
    Ok(())
}
