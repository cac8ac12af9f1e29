//! Configuration for store-replay
//!
//! This crate provides:
//! - The replay scenario schema (`ReplayConfig`, TOML)
//! - Conversion from TOML values into store values
//! - Scenario file discovery (explicit path, CWD, config directory)

pub mod config_file;
pub mod paths;
pub mod scenario;
pub mod toml_value;

pub use config_file::load_config_file;
pub use scenario::{ActionEntry, Binding, ReducerKind, ReplayConfig, StoreSection};
pub use toml_value::to_store_value;
