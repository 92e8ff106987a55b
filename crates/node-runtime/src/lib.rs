//! # Node Runtime Library
//!
//! Drives the keyshare subsystem against in-process collaborators. The
//! `node-runtime` binary wraps [`KeyshareNode`] in a block ticker.
//!
//! - `config/` - environment-driven runtime parameters
//! - `genesis/` - initial store contents
//! - `adapters/` - staking, peer registry and transport implementations
//! - `node/` - block production

pub mod adapters;
pub mod config;
pub mod genesis;
pub mod node;

pub use config::{load_config, NodeConfig};
pub use genesis::{GenesisConfig, GenesisError};
pub use node::KeyshareNode;
