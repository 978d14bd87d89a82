//! Reaper CLI - tag-driven resource lifecycle enforcement.

use clap::Parser;
use reaper_cli::commands;
use reaper_cli::{Cli, Command, ReaperConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> reaper_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = ReaperConfig::load(cli.config.as_deref())?;
    config.apply_env();
    if cli.live {
        config.set_live_mode(true);
    }

    match cli.command {
        Command::Sweep => {
            let mut provider = commands::load_provider(cli.inventory.as_deref())?;
            commands::execute_sweep(&config, &mut provider)?;
        }
        Command::Watch => {
            let provider = commands::load_provider(cli.inventory.as_deref())?;
            commands::execute_watch(&config, provider).await?;
        }
        Command::Enforce(args) => {
            let mut provider = commands::load_provider(cli.inventory.as_deref())?;
            commands::execute_enforce(&args, &config, &mut provider).await?;
        }
    }

    Ok(())
}
