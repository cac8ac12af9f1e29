//! store-replay
//!
//! Builds an immutable reducer store from a TOML scenario, replays the
//! scenario's actions and prints the final state as JSON.

mod reducers;
mod replay;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use store_replay_config::ReplayConfig;

#[derive(Parser, Debug)]
#[command(
    name = "store-replay",
    version,
    about = "Replay scripted actions through an immutable reducer store"
)]
struct Cli {
    /// Scenario file to replay.
    ///
    /// Defaults to `.store-replay.toml` in the working directory, then in the
    /// platform config directory.
    scenario: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ReplayConfig::load(cli.scenario.as_deref())?;

    let mut store = replay::build_store(&config).context("Failed to build store")?;
    log::info!("Built {}", store);

    let outcome = replay::replay(&mut store, &config);
    for (action_type, err) in &outcome.rejected {
        eprintln!("rejected `{}`: {}", action_type, err);
    }
    log::info!(
        "Replay finished: {} applied, {} ignored, {} rejected ({} invariant violations)",
        outcome.applied,
        outcome.ignored,
        outcome.rejected.len(),
        outcome.violations()
    );

    let state = replay::final_state(&store).context("Failed to read final state")?;
    println!("{}", serde_json::to_string_pretty(&state.to_json())?);

    Ok(())
}
