//! Neighbours command handler: direct links out of one city.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use routeplanner_lib::{RouteNetwork, TransportMode};

use crate::commands::load_network_blocking;
use crate::output::OutputFormat;

/// Arguments for the neighbours command.
#[derive(Debug, Clone)]
pub struct NeighboursCommandArgs {
    pub city: String,
    pub mode: TransportMode,
}

#[derive(Debug, Serialize)]
struct NeighbourEntry {
    name: String,
    distance: f64,
}

#[derive(Debug, Serialize)]
struct NeighboursReport {
    city: String,
    mode: TransportMode,
    neighbours: Vec<NeighbourEntry>,
}

fn collect(network: &RouteNetwork, args: &NeighboursCommandArgs) -> Result<NeighboursReport> {
    let id = network.resolve_city(&args.city)?;
    let neighbours = network
        .neighbours(id, args.mode)
        .into_iter()
        .filter_map(|other| {
            let link = network.link_between(id, other, args.mode)?;
            let name = network.city_name(other)?;
            Some(NeighbourEntry {
                name: name.to_string(),
                distance: link.distance,
            })
        })
        .collect();

    Ok(NeighboursReport {
        city: args.city.clone(),
        mode: args.mode,
        neighbours,
    })
}

/// Handle the neighbours subcommand.
pub fn handle_neighbours_command(
    data_dir: &Path,
    format: OutputFormat,
    args: &NeighboursCommandArgs,
) -> Result<()> {
    let network = load_network_blocking(data_dir)?;
    let report = collect(&network, args)?;

    match format {
        OutputFormat::Text => {
            if report.neighbours.is_empty() {
                println!("{} has no {} links", report.city, report.mode);
            } else {
                println!("Neighbours of {} by {}:", report.city, report.mode);
                for entry in &report.neighbours {
                    println!("  {} ({:.1} km)", entry.name, entry.distance);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
