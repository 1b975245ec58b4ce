//! turnbot CLI: run the webhook echo bot. Config from `.env`, env and CLI flags.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::info;
use turnbot_core::init_tracing;
use turnbot_server::cli::{load_config, Cli, Commands};
use turnbot_server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { port, bind } => {
            let config = load_config(port, bind)?;
            init_tracing(Some(config.log_file.as_str()).filter(|p| !p.is_empty()))?;
            info!(
                start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
                log_file = %config.log_file,
                addr = %config.socket_addr(),
                "turnbot started"
            );
            serve(&config).await
        }
    }
}
