//! Route planner library entry points.
//!
//! This crate loads a network of cities joined by mode-tagged links, resolves
//! cities by name and computes the shortest route between two of them for a
//! single transport mode. Higher-level consumers (the CLI) should only depend
//! on the functions exported here instead of reimplementing behavior.
//!

pub mod city;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod link;
pub mod output;
pub mod path;
pub mod progress;
pub mod routing;

pub use city::{City, CityId, Location};
pub use dataset::{load_network, load_network_from_readers, resolve_data_dir, NetworkPaths};
pub use error::{Error, Result};
pub use graph::{NetworkBuilder, RouteNetwork};
pub use link::{Link, TransportMode};
pub use output::{RouteStep, RouteSummary};
pub use path::{LinkWeighting, SearchTree};
pub use progress::{Milestone, ProgressObserver, RouteRequestHook};
#[cfg(feature = "async")]
pub use routing::{find_shortest_route_async, spawn_shortest_route, RouteTask};
pub use routing::{
    find_shortest_route, find_shortest_route_with, Route, RouteAlgorithm, RouteRequest,
};
