//! Application layer: run-level configuration shared by agents and runners.

pub mod config;

pub use config::AgentConfig;
