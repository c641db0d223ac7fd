//! Core library for the shard storage node.
//!
//! This crate provides the abstractions shared by the node and its
//! collaborators:
//! - Record identifiers
//! - Service addresses and the router client contract
//! - Storage error kinds

pub mod error;
pub mod network;
pub mod record;

pub use error::{Result, StorageError};
pub use network::{RouterClient, ServiceAddr};
pub use record::RecordId;
