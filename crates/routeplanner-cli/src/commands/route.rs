//! Route command handler for computing paths between cities.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::debug;

use routeplanner_lib::{
    spawn_shortest_route, City, LinkWeighting, ProgressObserver, RouteAlgorithm, RouteRequest,
    RouteRequestHook, RouteSummary, TransportMode,
};

use crate::commands::load_network_blocking;
use crate::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting city name.
    pub from: String,
    /// Destination city name.
    pub to: String,
    /// Transport mode every link on the route must use.
    pub mode: TransportMode,
    /// Frontier strategy.
    pub algorithm: RouteAlgorithm,
    /// How link distances in the output are computed.
    pub weighting: LinkWeighting,
    /// Echo milestones to stderr while the search runs.
    pub progress: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from.clone(), self.to.clone(), self.mode)
            .with_algorithm(self.algorithm)
            .with_weighting(self.weighting)
    }
}

/// Handle the route subcommand.
///
/// Loads the network, runs the search on the blocking pool and prints the
/// summary in the requested format.
pub async fn handle_route_command(
    data_dir: &Path,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = Arc::new(load_network_blocking(data_dir)?);

    let (progress, forwarder) = if args.progress {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let forwarder = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                eprintln!("{message}");
            }
        });
        let observer: Arc<dyn ProgressObserver + Send + Sync> = Arc::new(tx);
        (Some(observer), Some(forwarder))
    } else {
        (None, None)
    };

    let hook: Arc<dyn RouteRequestHook + Send + Sync> =
        Arc::new(|from: &City, to: &City, mode: TransportMode| {
            debug!(from = %from.name, to = %to.name, %mode, "route requested");
        });

    let result = spawn_shortest_route(
        Arc::clone(&network),
        args.to_request(),
        progress,
        Some(hook),
    )
    .await;

    // The sender is dropped with the finished task, so the forwarder drains and exits.
    if let Some(forwarder) = forwarder {
        let _ = forwarder.await;
    }

    let route = result?;
    let summary =
        RouteSummary::from_route(&network, &route).context("failed to summarise route")?;

    match format {
        OutputFormat::Text => print!("{}", summary.render_text()),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }
    Ok(())
}
