//! Search strategies behind the [`RoutePlanner`] trait.
//!
//! Both planners run Dijkstra over the same relevant-city subset and settle
//! cities in the same order; they differ only in how the frontier minimum is
//! found.

use crate::city::CityId;
use crate::graph::RouteNetwork;
use crate::link::TransportMode;
use crate::path::{dijkstra, dijkstra_scan, SearchTree};

use super::RouteAlgorithm;

/// Trait for shortest-path search strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search `subset` (source first) using only links tagged with `mode`.
    fn search(&self, network: &RouteNetwork, subset: &[CityId], mode: TransportMode)
        -> SearchTree;
}

/// Dijkstra with a binary-heap frontier, O((V + E) log V).
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn search(
        &self,
        network: &RouteNetwork,
        subset: &[CityId],
        mode: TransportMode,
    ) -> SearchTree {
        dijkstra(network, subset, mode)
    }
}

/// Dijkstra with a linear-scan frontier, O(V²).
#[derive(Debug, Clone, Default)]
pub struct ScanPlanner;

impl RoutePlanner for ScanPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::DijkstraScan
    }

    fn search(
        &self,
        network: &RouteNetwork,
        subset: &[CityId],
        mode: TransportMode,
    ) -> SearchTree {
        dijkstra_scan(network, subset, mode)
    }
}

/// Select the planner implementing `algorithm`.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::DijkstraScan => Box::new(ScanPlanner),
    }
}
