use crate::paths::{global_config_path, local_config_path};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Load scenario file content
///
/// Searches, in order:
/// 1. The explicitly given path (must exist)
/// 2. `.store-replay.toml` in the current working directory
/// 3. `store-replay/config.toml` in the platform config directory
///
/// Returns the path that was read together with its content.
pub fn load_config_file(explicit: Option<&Path>) -> Result<(PathBuf, String)> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        log::debug!("Loaded scenario from {}", path.display());
        return Ok((path.to_path_buf(), content));
    }

    let candidates = [local_config_path(), global_config_path()];
    for candidate in candidates.into_iter().flatten() {
        if let Ok(content) = std::fs::read_to_string(&candidate) {
            log::debug!("Loaded scenario from {}", candidate.display());
            return Ok((candidate, content));
        }
    }

    bail!("No scenario file given and none found in the working or config directory")
}
