// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs parses arguments and dispatches here.

pub mod neighbours;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use routeplanner_lib::{load_network, RouteNetwork};

/// Load the network from `data_dir` inside a blocking region.
pub fn load_network_blocking(data_dir: &Path) -> Result<RouteNetwork> {
    tokio::task::block_in_place(|| load_network(data_dir))
        .with_context(|| format!("failed to load route network from {}", data_dir.display()))
}
