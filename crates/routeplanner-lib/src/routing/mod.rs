//! Route planning entry points.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported frontier strategies for Dijkstra
//! - [`RouteRequest`] - Endpoint names, transport mode and search options
//! - [`Route`] - The resulting ordered link sequence
//! - [`find_shortest_route`] / [`find_shortest_route_with`] - Synchronous search
//! - `find_shortest_route_async` / `spawn_shortest_route` - Background search
//!   on the tokio blocking pool (feature `async`)
//!
//! # Example
//!
//! ```ignore
//! use routeplanner_lib::{find_shortest_route, load_network, RouteRequest, TransportMode};
//!
//! let network = load_network("data".as_ref())?;
//! let request = RouteRequest::new("Bern", "Zürich", TransportMode::Rail);
//! let route = find_shortest_route(&network, &request)?;
//! println!("{} hops, {:.1} km", route.hop_count(), route.total_distance);
//! ```

mod planner;
#[cfg(feature = "async")]
mod task;

pub use planner::{select_planner, DijkstraPlanner, RoutePlanner, ScanPlanner};
#[cfg(feature = "async")]
pub use task::{find_shortest_route_async, spawn_shortest_route, RouteTask};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::city::CityId;
use crate::error::{Error, Result};
use crate::graph::RouteNetwork;
use crate::link::{Link, TransportMode};
use crate::path::{reconstruct_path, to_links, LinkWeighting};
use crate::progress::{report, Milestone, ProgressObserver, RouteRequestHook};

/// Supported frontier strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra with a binary-heap frontier.
    #[default]
    Dijkstra,
    /// Dijkstra with a linear-scan frontier.
    #[serde(rename = "dijkstra-scan")]
    DijkstraScan,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::DijkstraScan => "dijkstra-scan",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "dijkstra-scan" | "dijkstra_scan" | "scan" => Ok(RouteAlgorithm::DijkstraScan),
            _ => Err(Error::UnsupportedRouteOption {
                option: format!("algorithm '{value}'"),
            }),
        }
    }
}

/// High-level route request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub mode: TransportMode,
    pub algorithm: RouteAlgorithm,
    pub weighting: LinkWeighting,
}

impl RouteRequest {
    /// Request with the default algorithm and stored link weights.
    pub fn new(from: impl Into<String>, to: impl Into<String>, mode: TransportMode) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            mode,
            algorithm: RouteAlgorithm::default(),
            weighting: LinkWeighting::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_weighting(mut self, weighting: LinkWeighting) -> Self {
        self.weighting = weighting;
        self
    }
}

/// Shortest route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub mode: TransportMode,
    pub algorithm: RouteAlgorithm,
    pub weighting: LinkWeighting,
    /// Cities on the route, source first.
    pub cities: Vec<CityId>,
    /// Links between consecutive cities, oriented source to target.
    pub links: Vec<Link>,
    pub total_distance: f64,
}

impl Route {
    /// Number of links in the route.
    pub fn hop_count(&self) -> usize {
        self.links.len()
    }

    /// `true` when source and target are the same city.
    pub fn is_trivial(&self) -> bool {
        self.links.is_empty()
    }
}

/// Compute the shortest route without observers.
pub fn find_shortest_route(network: &RouteNetwork, request: &RouteRequest) -> Result<Route> {
    find_shortest_route_with(network, request, None, None)
}

/// Compute the shortest route, reporting milestones to `progress` and the
/// resolved request to `hook`.
///
/// 1. Resolve both city names (unknown names fail before any search work)
/// 2. Notify the request hook
/// 3. Compute the relevant city subset
/// 4. Run the selected planner
/// 5. Reconstruct the city sequence, then the link sequence
pub fn find_shortest_route_with(
    network: &RouteNetwork,
    request: &RouteRequest,
    progress: Option<&dyn ProgressObserver>,
    hook: Option<&dyn RouteRequestHook>,
) -> Result<Route> {
    // Step 1: Resolve endpoints
    let from_id = network.resolve_city(&request.from)?;
    let to_id = network.resolve_city(&request.to)?;
    report(progress, Milestone::EndpointsResolved);

    // Step 2: Announce the request
    if let Some(hook) = hook {
        if let (Some(from), Some(to)) = (network.city(from_id), network.city(to_id)) {
            hook.on_route_requested(from, to, request.mode);
        }
    }

    // Step 3: Relevant cities
    let subset = network.cities_between_ids(from_id, to_id);
    report(progress, Milestone::RelevantCitiesComputed);
    if subset.is_empty() || (from_id != to_id && network.links().is_empty()) {
        return Err(Error::EmptyNetwork);
    }
    debug!(
        from = %request.from,
        to = %request.to,
        mode = %request.mode,
        cities = subset.len(),
        "searching route"
    );

    // Step 4: Relaxation
    let planner = select_planner(request.algorithm);
    let tree = planner.search(network, &subset, request.mode);
    report(progress, Milestone::RelaxationComplete);

    // Step 5: Reconstruction
    let cities = reconstruct_path(&tree, from_id, to_id).ok_or_else(|| Error::RouteNotFound {
        from: request.from.clone(),
        to: request.to.clone(),
        mode: request.mode,
    })?;
    report(progress, Milestone::CitiesExtracted);

    let links = to_links(network, &cities, request.mode, request.weighting);
    report(progress, Milestone::LinksFinalised);

    let total_distance = links.iter().map(|link| link.distance).sum();
    info!(
        from = %request.from,
        to = %request.to,
        mode = %request.mode,
        hops = links.len(),
        total_distance,
        settled = tree.settled_count(),
        "route found"
    );

    Ok(Route {
        mode: request.mode,
        algorithm: planner.algorithm(),
        weighting: request.weighting,
        cities,
        links,
        total_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_hop_count() {
        let route = Route {
            mode: TransportMode::Car,
            algorithm: RouteAlgorithm::Dijkstra,
            weighting: LinkWeighting::Stored,
            cities: vec![0, 2, 3],
            links: vec![
                Link::new(0, 2, 3.0, TransportMode::Car),
                Link::new(2, 3, 3.0, TransportMode::Car),
            ],
            total_distance: 6.0,
        };
        assert_eq!(route.hop_count(), 2);
        assert!(!route.is_trivial());
    }

    #[test]
    fn request_defaults() {
        let request = RouteRequest::new("A", "B", TransportMode::Bus);
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);
        assert_eq!(request.weighting, LinkWeighting::Stored);

        let request = request
            .with_algorithm(RouteAlgorithm::DijkstraScan)
            .with_weighting(LinkWeighting::Geometric);
        assert_eq!(request.algorithm, RouteAlgorithm::DijkstraScan);
        assert_eq!(request.weighting, LinkWeighting::Geometric);
    }

    #[test]
    fn algorithm_display_and_parse_agree() {
        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::DijkstraScan] {
            assert_eq!(
                algorithm.to_string().parse::<RouteAlgorithm>().unwrap(),
                algorithm
            );
        }
        assert!(matches!(
            "a-star".parse::<RouteAlgorithm>(),
            Err(Error::UnsupportedRouteOption { option }) if option == "algorithm 'a-star'"
        ));
    }
}
