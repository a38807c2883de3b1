use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use facematch::cli::{Cli, Commands};
use facematch::connector::api::controller::StatsController;
use facematch::Container;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(cli.log_filter())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(cli.container_config()).await?;
    info!(
        "Using {} with recognition threshold {:.2}",
        container.storage(),
        container.threshold()
    );

    match cli.command {
        Commands::Serve { host, port } => {
            facematch::serve(SocketAddr::new(host, port), Arc::new(container)).await?;
            info!("Server stopped");
        }

        Commands::Stats => {
            let output = StatsController::new(&container).stats().await?;
            println!("{}", output);
        }
    }

    Ok(())
}
