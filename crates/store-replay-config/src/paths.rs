//! Configuration paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/store-replay/`
//! - macOS: `~/Library/Application Support/store-replay/`
//! - Windows: `%APPDATA%\store-replay\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "store-replay";

/// Scenario file looked up in the current working directory
pub const LOCAL_CONFIG_FILE: &str = ".store-replay.toml";

/// Get the application config directory (not created)
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to the global scenario file
pub fn global_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to the local scenario file (in CWD)
pub fn local_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_config_path() {
        let local = local_config_path().unwrap();
        assert!(local.ends_with(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn test_global_config_path() {
        // no config dir in some sandboxes
        if let Ok(global) = global_config_path() {
            assert!(global.ends_with("store-replay/config.toml"));
        }
    }
}
