//! Subcommands of the `shardnode` binary.

use crate::client::LogRouterClient;
use crate::config::SettingsArgs;
use clap::Subcommand;
use node::{Node, Settings};
use std::sync::Arc;
use tracing::info;

/// Result of running a command.
pub type CommandResult = anyhow::Result<()>;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a node until interrupted, sending heartbeats to the router.
    Run(SettingsArgs),
    /// Validate settings and print the effective values.
    CheckConfig(SettingsArgs),
}

impl Command {
    pub async fn execute(self) -> CommandResult {
        match self {
            Command::Run(args) => run(args.resolve()?).await,
            Command::CheckConfig(args) => check_config(args.resolve()?),
        }
    }
}

async fn run(settings: Settings) -> CommandResult {
    let client = Arc::new(LogRouterClient::new());
    let node = Node::new(settings.into_config(client.clone())?);
    info!(
        addr = %node.addr(),
        router = %node.router(),
        "node started"
    );

    node.heartbeats()?;
    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    node.stop().await?;

    info!(heartbeats = client.sent(), "node stopped");
    Ok(())
}

fn check_config(settings: Settings) -> CommandResult {
    print!("{}", serde_yaml::to_string(&settings)?);
    Ok(())
}
