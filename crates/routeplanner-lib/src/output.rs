use std::fmt::Write;

use serde::Serialize;

use crate::city::CityId;
use crate::error::{Error, Result};
use crate::graph::RouteNetwork;
use crate::link::TransportMode;
use crate::path::LinkWeighting;
use crate::routing::{Route, RouteAlgorithm};

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
}

/// One link travelled along the route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub cumulative: f64,
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub mode: TransportMode,
    pub algorithm: RouteAlgorithm,
    pub weighting: LinkWeighting,
    pub hops: usize,
    pub total_distance: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with resolved city names.
    pub fn from_route(network: &RouteNetwork, route: &Route) -> Result<Self> {
        let endpoint = |id: CityId| {
            network
                .city(id)
                .map(|city| RouteEndpoint {
                    name: city.name.clone(),
                    country: city.country.clone(),
                })
                .ok_or_else(|| Error::DataValidation {
                    message: format!("route references unknown city #{id}"),
                })
        };

        let (Some(&first), Some(&last)) = (route.cities.first(), route.cities.last()) else {
            return Err(Error::DataValidation {
                message: "route has no cities".to_string(),
            });
        };

        let mut cumulative = 0.0;
        let mut steps = Vec::with_capacity(route.links.len());
        for (index, link) in route.links.iter().enumerate() {
            cumulative += link.distance;
            steps.push(RouteStep {
                index: index + 1,
                from: endpoint(link.from)?.name,
                to: endpoint(link.to)?.name,
                distance: link.distance,
                cumulative,
            });
        }

        Ok(Self {
            mode: route.mode,
            algorithm: route.algorithm,
            weighting: route.weighting,
            hops: route.hop_count(),
            total_distance: route.total_distance,
            start: endpoint(first)?,
            goal: endpoint(last)?,
            steps,
        })
    }

    /// Render the summary as plain text.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} to {} by {} ({} hops, {:.1} km, algorithm: {})",
            self.start.name,
            self.goal.name,
            self.mode,
            self.hops,
            self.total_distance,
            self.algorithm
        );
        if self.steps.is_empty() {
            let _ = writeln!(buffer, "  already at {}", self.start.name);
        }
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "  {:>2}. {} -> {} {:>8.1} km (total {:.1} km)",
                step.index, step.from, step.to, step.distance, step.cumulative
            );
        }
        buffer
    }

    /// Render the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
