//! Storage node of a sharded key-value cluster.
//!
//! A [`Node`] holds one in-memory shard, answers point requests on it and
//! periodically announces itself to the router:
//! - `put` / `get` / `del` over a single mutex-guarded table
//! - `heartbeats` / `stop` for the background announcement task
//!
//! # Example
//!
//! ```rust,no_run
//! use node::{Node, Settings};
//! # use std::sync::Arc;
//! # async fn run(client: Arc<dyn corelib::RouterClient>) -> anyhow::Result<()> {
//! let settings = Settings::load("node.yaml")?;
//! let node = Node::new(settings.into_config(client)?);
//!
//! node.heartbeats()?;
//! node.put("user:1".into(), &b"alice"[..])?;
//! assert_eq!(&node.get(&"user:1".into())?[..], b"alice");
//! node.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
mod heartbeat;
pub mod node;
pub mod table;

pub use config::{Config, Settings};
pub use error::{ConfigError, HeartbeatError};
pub use node::Node;
pub use table::Table;
