//! Configuration management for the tfsgit bridge.
//!
//! This crate loads [`BridgeConfig`](config::BridgeConfig) from defaults, an
//! optional `.tfsgit.yaml` in the working tree, and `TFSGIT_*` environment
//! variables.

pub mod config;

pub use config::{BridgeConfig, ConfigError, load_config};
