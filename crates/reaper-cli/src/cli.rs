//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reaper CLI - tag-driven lifecycle enforcement for cloud resources.
#[derive(Debug, Parser)]
#[command(name = "reaper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./reaper.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inventory fixture to run against (JSON)
    #[arg(short, long, global = true)]
    pub inventory: Option<PathBuf>,

    /// Enable live mode: actually issue destructive commands
    ///
    /// Overrides both the config file and the LIVEMODE environment variable.
    #[arg(long, global = true)]
    pub live: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one sweep over every configured resource kind
    Sweep,

    /// Run sweeps on the configured interval until interrupted
    Watch,

    /// Enforce the expiration tag on one freshly created resource
    Enforce(EnforceArgs),
}

/// Arguments for the enforce command.
#[derive(Debug, Parser)]
pub struct EnforceArgs {
    /// Provider-assigned id of the resource to enforce
    pub resource_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sweep_with_flags() {
        let cli = Cli::parse_from(["reaper", "sweep", "--live", "--inventory", "inv.json"]);
        assert!(cli.live);
        assert_eq!(cli.inventory, Some(PathBuf::from("inv.json")));
        assert!(matches!(cli.command, Command::Sweep));
    }

    #[test]
    fn test_parse_enforce_takes_a_resource_id() {
        let cli = Cli::parse_from(["reaper", "enforce", "i-0abc123"]);
        match cli.command {
            Command::Enforce(args) => assert_eq!(args.resource_id, "i-0abc123"),
            other => panic!("expected enforce, got {:?}", other),
        }
    }
}
