use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{trace, warn};

use crate::city::CityId;
use crate::error::Error;
use crate::graph::RouteNetwork;
use crate::link::{Link, TransportMode};

/// Source of the weights attached to a reconstructed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkWeighting {
    /// Weight of the stored link the search traversed.
    #[default]
    Stored,
    /// Great-circle distance between the two cities' locations.
    Geometric,
}

impl fmt::Display for LinkWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            LinkWeighting::Stored => "stored",
            LinkWeighting::Geometric => "geometric",
        };
        f.write_str(value)
    }
}

impl FromStr for LinkWeighting {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stored" => Ok(LinkWeighting::Stored),
            "geometric" => Ok(LinkWeighting::Geometric),
            _ => Err(Error::UnsupportedRouteOption {
                option: format!("weighting '{value}'"),
            }),
        }
    }
}

/// Distances and predecessors produced by one search.
///
/// Only cities from the searched subset carry entries. Absent distances read
/// as `+∞`; the source's predecessor is `None`, as is that of any city the
/// search never reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTree {
    source: CityId,
    distances: HashMap<CityId, f64>,
    predecessors: HashMap<CityId, Option<CityId>>,
    settled: usize,
}

impl SearchTree {
    fn new(subset: &[CityId]) -> Self {
        let mut distances = HashMap::with_capacity(subset.len());
        let mut predecessors = HashMap::with_capacity(subset.len());
        for &city in subset {
            distances.insert(city, f64::INFINITY);
            predecessors.insert(city, None);
        }
        let source = subset[0];
        distances.insert(source, 0.0);
        Self {
            source,
            distances,
            predecessors,
            settled: 0,
        }
    }

    pub fn source(&self) -> CityId {
        self.source
    }

    pub fn distance(&self, city: CityId) -> f64 {
        self.distances.get(&city).copied().unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, city: CityId) -> Option<CityId> {
        self.predecessors.get(&city).copied().flatten()
    }

    pub fn is_reachable(&self, city: CityId) -> bool {
        self.distance(city).is_finite()
    }

    /// Number of cities settled before the search stopped.
    pub fn settled_count(&self) -> usize {
        self.settled
    }

    fn contains(&self, city: CityId) -> bool {
        self.distances.contains_key(&city)
    }

    /// Relax the edge `u -> n`. A missing link counts as infinite cost.
    fn relax(&mut self, network: &RouteNetwork, u: CityId, n: CityId, mode: TransportMode) -> bool {
        if !self.contains(n) {
            return false;
        }
        let weight = network
            .link_between(u, n, mode)
            .map(|link| link.distance)
            .unwrap_or(f64::INFINITY);
        let candidate = self.distance(u) + weight;
        if candidate < self.distance(n) {
            self.distances.insert(n, candidate);
            self.predecessors.insert(n, Some(u));
            true
        } else {
            false
        }
    }
}

/// Run Dijkstra over `subset` (source first) with a binary-heap frontier.
///
/// Heap entries are ordered by `(distance, position in subset)`, so among
/// equally distant cities the one listed first is settled first, the same
/// order a linear scan over the subset produces. The search stops when the
/// heap drains, i.e. every unsettled city is at `+∞`.
///
/// # Panics
///
/// Panics if `subset` is empty.
pub fn dijkstra(network: &RouteNetwork, subset: &[CityId], mode: TransportMode) -> SearchTree {
    let mut tree = SearchTree::new(subset);
    let order: HashMap<CityId, usize> = subset
        .iter()
        .enumerate()
        .map(|(position, &city)| (city, position))
        .collect();
    let mut settled: HashSet<CityId> = HashSet::with_capacity(subset.len());
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(tree.source, 0.0, 0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.city) {
            continue;
        }
        tree.settled += 1;
        trace!(city = entry.city, distance = entry.cost.0, "settled");

        for neighbour in network.neighbours(entry.city, mode) {
            if settled.contains(&neighbour) {
                continue;
            }
            if tree.relax(network, entry.city, neighbour, mode) {
                queue.push(QueueEntry::new(
                    neighbour,
                    tree.distance(neighbour),
                    order[&neighbour],
                ));
            }
        }
    }

    tree
}

/// Run Dijkstra over `subset` (source first) with a linear-scan frontier.
///
/// Each round picks the first unsettled city with the smallest finite
/// distance; the loop ends as soon as none is left. O(V²), kept for small
/// networks and as the reference the heap variant is checked against.
///
/// # Panics
///
/// Panics if `subset` is empty.
pub fn dijkstra_scan(network: &RouteNetwork, subset: &[CityId], mode: TransportMode) -> SearchTree {
    let mut tree = SearchTree::new(subset);
    let mut frontier: Vec<CityId> = subset.to_vec();

    while !frontier.is_empty() {
        let mut selected: Option<usize> = None;
        let mut min_distance = f64::INFINITY;
        for (index, &city) in frontier.iter().enumerate() {
            let distance = tree.distance(city);
            if distance < min_distance {
                selected = Some(index);
                min_distance = distance;
            }
        }

        let Some(index) = selected else {
            break;
        };
        let u = frontier.remove(index);
        tree.settled += 1;
        trace!(city = u, distance = min_distance, "settled");

        for neighbour in network.neighbours(u, mode) {
            tree.relax(network, u, neighbour, mode);
        }
    }

    tree
}

/// Walk predecessors from `target` back to `source`.
///
/// Returns `None` when `target` is unreachable. `source == target` yields the
/// single-city path.
pub fn reconstruct_path(tree: &SearchTree, source: CityId, target: CityId) -> Option<Vec<CityId>> {
    if !tree.is_reachable(target) {
        return None;
    }

    let mut path = Vec::new();
    let mut current = target;
    while let Some(previous) = tree.predecessor(current) {
        path.push(current);
        current = previous;
    }
    if current != source {
        return None;
    }
    path.push(source);
    path.reverse();
    Some(path)
}

/// Turn a city sequence into links tagged with `mode`, oriented along the
/// route.
pub fn to_links(
    network: &RouteNetwork,
    cities: &[CityId],
    mode: TransportMode,
    weighting: LinkWeighting,
) -> Vec<Link> {
    cities
        .windows(2)
        .map(|pair| {
            let (u, v) = (pair[0], pair[1]);
            let distance = match weighting {
                LinkWeighting::Stored => match network.link_between(u, v, mode) {
                    Some(link) => link.distance,
                    None => {
                        warn!(from = u, to = v, %mode, "no stored link on route, using geometry");
                        geometric_distance(network, u, v)
                    }
                },
                LinkWeighting::Geometric => geometric_distance(network, u, v),
            };
            Link::new(u, v, distance, mode)
        })
        .collect()
}

fn geometric_distance(network: &RouteNetwork, u: CityId, v: CityId) -> f64 {
    match (network.city(u), network.city(v)) {
        (Some(a), Some(b)) => a.distance_to(b),
        _ => f64::INFINITY,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    city: CityId,
    cost: FloatOrd,
    order: usize,
}

impl QueueEntry {
    fn new(city: CityId, cost: f64, order: usize) -> Self {
        Self {
            city,
            cost: FloatOrd(cost),
            order,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by
        // position in the searched subset.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
