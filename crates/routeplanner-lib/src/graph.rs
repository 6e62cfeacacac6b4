use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::city::{City, CityId};
use crate::error::{Error, Result};
use crate::link::{Link, TransportMode};

/// Minimum normalized similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Immutable collection of cities and the mode-tagged links between them.
///
/// Links are indexed per `(city, mode)` so neighbour and link lookups only
/// touch the links incident to one city. The network is never mutated after
/// construction, which lets concurrent searches share it through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RouteNetwork {
    cities: Vec<City>,
    name_to_id: HashMap<String, CityId>,
    links: Vec<Link>,
    incident: HashMap<(CityId, TransportMode), Vec<usize>>,
}

impl RouteNetwork {
    /// Build a network from cities and links addressed by [`CityId`].
    ///
    /// Fails on duplicate city names, links pointing outside the city list, or
    /// link weights that are negative or not finite.
    pub fn new(cities: Vec<City>, links: Vec<Link>) -> Result<Self> {
        let mut name_to_id = HashMap::with_capacity(cities.len());
        for (id, city) in cities.iter().enumerate() {
            if name_to_id.insert(city.name.clone(), id).is_some() {
                return Err(Error::DuplicateCity {
                    name: city.name.clone(),
                });
            }
        }

        let mut incident: HashMap<(CityId, TransportMode), Vec<usize>> = HashMap::new();
        for (index, link) in links.iter().enumerate() {
            for endpoint in [link.from, link.to] {
                if endpoint >= cities.len() {
                    return Err(Error::UnknownLinkEndpoint {
                        name: format!("#{endpoint}"),
                    });
                }
            }
            if !link.distance.is_finite() || link.distance < 0.0 {
                return Err(Error::InvalidLinkWeight {
                    from: cities[link.from].name.clone(),
                    to: cities[link.to].name.clone(),
                    distance: link.distance,
                });
            }

            incident.entry((link.from, link.mode)).or_default().push(index);
            if link.to != link.from {
                incident.entry((link.to, link.mode)).or_default().push(index);
            }
        }

        debug!(cities = cities.len(), links = links.len(), "built route network");

        Ok(Self {
            cities,
            name_to_id,
            links,
            incident,
        })
    }

    /// Start a name-based builder.
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id)
    }

    /// Lookup a city name by identifier.
    pub fn city_name(&self, id: CityId) -> Option<&str> {
        self.cities.get(id).map(|city| city.name.as_str())
    }

    /// Lookup a city identifier by its case-sensitive name.
    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a city by its case-sensitive name.
    pub fn find_city(&self, name: &str) -> Option<&City> {
        self.city_id(name).and_then(|id| self.cities.get(id))
    }

    /// Resolve a city name or produce an [`Error::UnknownCity`] carrying
    /// spelling suggestions.
    pub fn resolve_city(&self, name: &str) -> Result<CityId> {
        self.city_id(name).ok_or_else(|| Error::UnknownCity {
            name: name.to_string(),
            suggestions: self.fuzzy_city_matches(name, 3),
        })
    }

    /// Cities relevant to a search from `from` to `to`.
    ///
    /// Every city takes part; `from` comes first, `to` last and the rest keep
    /// catalogue order. Returns `None` if either name is unknown.
    pub fn find_cities_between(&self, from: &str, to: &str) -> Option<Vec<CityId>> {
        let from_id = self.city_id(from)?;
        let to_id = self.city_id(to)?;
        Some(self.cities_between_ids(from_id, to_id))
    }

    pub(crate) fn cities_between_ids(&self, from: CityId, to: CityId) -> Vec<CityId> {
        let mut ordered = Vec::with_capacity(self.cities.len());
        ordered.push(from);
        ordered.extend((0..self.cities.len()).filter(|&id| id != from && id != to));
        if to != from {
            ordered.push(to);
        }
        ordered
    }

    /// Cities adjacent to `city` through a link of `mode`, in link order and
    /// without duplicates.
    pub fn neighbours(&self, city: CityId, mode: TransportMode) -> Vec<CityId> {
        let mut neighbours: Vec<CityId> = Vec::new();
        for link in self.incident_links(city, mode) {
            if let Some(other) = link.other_end(city) {
                if !neighbours.contains(&other) {
                    neighbours.push(other);
                }
            }
        }
        neighbours
    }

    /// The stored link joining `u` and `v` under `mode`, in either orientation.
    ///
    /// When parallel links exist the lightest wins; equal weights keep the
    /// first inserted.
    pub fn link_between(&self, u: CityId, v: CityId, mode: TransportMode) -> Option<&Link> {
        self.incident_links(u, mode)
            .filter(|link| link.connects(u, v))
            .fold(None, |best: Option<&Link>, link| match best {
                Some(current) if compare_distance(current.distance, link.distance).is_le() => {
                    Some(current)
                }
                _ => Some(link),
            })
    }

    /// All links tagged with `mode`, in insertion order.
    pub fn links_for_mode(&self, mode: TransportMode) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |link| link.mode == mode)
    }

    /// Up to `limit` city names similar to `name`, best match first.
    pub fn fuzzy_city_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .cities
            .iter()
            .filter_map(|city| {
                let candidate = city.name.to_lowercase();
                let score = if candidate == needle {
                    1.0
                } else {
                    strsim::normalized_levenshtein(&needle, &candidate)
                };
                (score >= SUGGESTION_THRESHOLD).then_some((score, city.name.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| compare_distance(b.0, a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    fn incident_links(&self, city: CityId, mode: TransportMode) -> impl Iterator<Item = &Link> {
        self.incident
            .get(&(city, mode))
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.links[index])
    }
}

/// Name-based builder for [`RouteNetwork`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    cities: Vec<City>,
    pending_links: Vec<PendingLink>,
}

#[derive(Debug)]
struct PendingLink {
    from: String,
    to: String,
    distance: Option<f64>,
    mode: TransportMode,
}

impl NetworkBuilder {
    pub fn city(mut self, city: City) -> Self {
        self.cities.push(city);
        self
    }

    pub fn cities(mut self, cities: impl IntoIterator<Item = City>) -> Self {
        self.cities.extend(cities);
        self
    }

    /// Add a link with an explicit weight.
    pub fn link(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
        mode: TransportMode,
    ) -> Self {
        self.pending_links.push(PendingLink {
            from: from.into(),
            to: to.into(),
            distance: Some(distance),
            mode,
        });
        self
    }

    /// Add a link whose weight is the great-circle distance between its cities.
    pub fn geometric_link(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        mode: TransportMode,
    ) -> Self {
        self.pending_links.push(PendingLink {
            from: from.into(),
            to: to.into(),
            distance: None,
            mode,
        });
        self
    }

    pub(crate) fn push_link(
        &mut self,
        from: String,
        to: String,
        distance: Option<f64>,
        mode: TransportMode,
    ) {
        self.pending_links.push(PendingLink {
            from,
            to,
            distance,
            mode,
        });
    }

    pub fn build(self) -> Result<RouteNetwork> {
        let mut name_to_id: HashMap<&str, CityId> = HashMap::with_capacity(self.cities.len());
        for (id, city) in self.cities.iter().enumerate() {
            if name_to_id.insert(city.name.as_str(), id).is_some() {
                return Err(Error::DuplicateCity {
                    name: city.name.clone(),
                });
            }
        }

        let mut links = Vec::with_capacity(self.pending_links.len());
        for pending in &self.pending_links {
            let from = lookup(&name_to_id, &pending.from)?;
            let to = lookup(&name_to_id, &pending.to)?;
            let distance = pending
                .distance
                .unwrap_or_else(|| self.cities[from].distance_to(&self.cities[to]));
            links.push(Link::new(from, to, distance, pending.mode));
        }

        RouteNetwork::new(self.cities, links)
    }
}

fn lookup(name_to_id: &HashMap<&str, CityId>, name: &str) -> Result<CityId> {
    name_to_id
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownLinkEndpoint {
            name: name.to_string(),
        })
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
