//! Command-line arguments.

use crate::commands::{Command, CommandResult};
use anyhow::Context;
use clap::{Args, Parser};
use corelib::ServiceAddr;
use node::Settings;
use std::path::PathBuf;

/// Run and inspect a shard storage node.
#[derive(Debug, Parser)]
#[command(name = "shardnode", version, about)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub async fn run(self) -> CommandResult {
        self.command.execute().await
    }
}

/// Where node settings come from: a YAML file, flags, or both (flags win).
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// Path to a YAML settings file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen at.
    #[arg(long)]
    pub addr: Option<String>,
    /// Address of the router service.
    #[arg(long)]
    pub router: Option<String>,
    /// Interval between two heartbeats, in milliseconds.
    #[arg(long)]
    pub heartbeat_ms: Option<u64>,
}

impl SettingsArgs {
    /// Build the effective settings.
    pub fn resolve(&self) -> anyhow::Result<Settings> {
        let settings = match &self.config {
            Some(path) => {
                let mut settings = Settings::load(path)
                    .with_context(|| format!("loading settings from {}", path.display()))?;
                if let Some(addr) = &self.addr {
                    settings.addr = ServiceAddr::from(addr.as_str());
                }
                if let Some(router) = &self.router {
                    settings.router = ServiceAddr::from(router.as_str());
                }
                if let Some(ms) = self.heartbeat_ms {
                    settings.heartbeat_ms = ms;
                }
                settings
            }
            None => {
                let addr = self.addr.as_deref().context("--addr is required without --config")?;
                let router = self
                    .router
                    .as_deref()
                    .context("--router is required without --config")?;
                Settings {
                    addr: addr.into(),
                    router: router.into(),
                    heartbeat_ms: self.heartbeat_ms.unwrap_or(1000),
                }
            }
        };

        settings.validate()?;
        Ok(settings)
    }
}
