use clap::Parser;
use jobboard_client::cli::{self, Cli};
use jobboard_client::config::{get_config, init_config};
use jobboard_client::JobBoard;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    init_config()?;
    let config = get_config();
    let board = JobBoard::from_config(config)?;
    let download_dir = cli
        .download_dir
        .clone()
        .unwrap_or_else(|| config.download_dir.clone());

    match cli::run(&board, cli.command, download_dir).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            eprintln!("{}", err.user_message());
            if err.is_unauthorized() {
                eprintln!("Log in again: jobboard login <email> <password>");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
