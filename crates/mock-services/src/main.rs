//! Mock Services CLI

use clap::Parser;
use mock_services::cli::{Cli, Commands, run_server};
use reward_shared::config::ObservabilityConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG 优先于命令行参数
    reward_shared::observability::tracing::init(&ObservabilityConfig {
        log_level: cli.log_level.clone(),
        log_format: if cli.json_logs { "json" } else { "pretty" }.to_string(),
        ..ObservabilityConfig::default()
    })?;

    match cli.command {
        Commands::Server(args) => run_server(&args).await?,
    }

    Ok(())
}
