mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routeplanner_lib::{resolve_data_dir, LinkWeighting, RouteAlgorithm, TransportMode};

use commands::neighbours::{handle_neighbours_command, NeighboursCommandArgs};
use commands::route::{handle_route_command, RouteCommandArgs};
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan routes through a network of cities")]
struct Cli {
    /// Directory containing cities.csv and links.csv
    /// (defaults to $ROUTEPLANNER_DATA_DIR, then ./data).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two cities for one transport mode.
    Route {
        /// Starting city name (case-sensitive).
        #[arg(long = "from")]
        from: String,
        /// Destination city name (case-sensitive).
        #[arg(long = "to")]
        to: String,
        /// Transport mode: ship, rail, flight, car, bus or tram.
        #[arg(long)]
        mode: TransportMode,
        /// Frontier strategy: dijkstra or dijkstra-scan.
        #[arg(long, default_value = "dijkstra")]
        algorithm: RouteAlgorithm,
        /// Link weights in the output: stored or geometric.
        #[arg(long, default_value = "stored")]
        weighting: LinkWeighting,
        /// Print search milestones to stderr.
        #[arg(long)]
        progress: bool,
    },
    /// List the cities directly reachable from a city by one transport mode.
    Neighbours {
        /// City name (case-sensitive).
        #[arg(long)]
        city: String,
        /// Transport mode: ship, rail, flight, car, bus or tram.
        #[arg(long)]
        mode: TransportMode,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    match cli.command {
        Command::Route {
            from,
            to,
            mode,
            algorithm,
            weighting,
            progress,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                mode,
                algorithm,
                weighting,
                progress,
            };
            handle_route_command(&data_dir, cli.format, &args).await
        }
        Command::Neighbours { city, mode } => {
            let args = NeighboursCommandArgs { city, mode };
            handle_neighbours_command(&data_dir, cli.format, &args)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
