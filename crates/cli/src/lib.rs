//! CLI tool for running a shard storage node.
//!
//! Provides commands for:
//! - Running a node with heartbeats until interrupted
//! - Validating node settings files

pub mod client;
pub mod commands;
pub mod config;

pub use client::LogRouterClient;
pub use commands::{Command, CommandResult};
pub use config::{CliConfig, SettingsArgs};
