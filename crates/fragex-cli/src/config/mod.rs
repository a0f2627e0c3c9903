//! Layered configuration for the CLI: built-in defaults, then an optional TOML file, then
//! command-line flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, build_search_config};
pub use models::{AppConfig, PropertyKind, SearchConfig};
