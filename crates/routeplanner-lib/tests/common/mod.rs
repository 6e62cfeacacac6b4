//! Shared fixtures for integration tests.

use std::path::PathBuf;

use routeplanner_lib::{City, Location, RouteNetwork, TransportMode};

/// Directory holding the checked-in CSV fixtures.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn city(name: &str, latitude: f64, longitude: f64) -> City {
    City::new(name, "Testland", 1_000, Location::new(latitude, longitude))
}

/// Four cities with two car routes from A to D: A-B-D (10) and A-C-D (6).
#[allow(dead_code)]
pub fn diamond() -> RouteNetwork {
    RouteNetwork::builder()
        .city(city("A", 0.0, 0.0))
        .city(city("B", 0.0, 0.1))
        .city(city("C", 0.1, 0.0))
        .city(city("D", 0.1, 0.1))
        .link("A", "B", 5.0, TransportMode::Car)
        .link("B", "D", 5.0, TransportMode::Car)
        .link("A", "C", 3.0, TransportMode::Car)
        .link("C", "D", 3.0, TransportMode::Car)
        .build()
        .expect("diamond network builds")
}
