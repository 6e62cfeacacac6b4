use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Dense identifier for a city within a [`RouteNetwork`](crate::RouteNetwork).
pub type CityId = usize;

/// Geographic position of a city, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another location in kilometres (haversine).
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A named location in the route network.
///
/// Only `name` and `location` matter to routing; the remaining fields are
/// carried through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub population: u64,
    pub location: Location,
}

impl City {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        population: u64,
        location: Location,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            population,
            location,
        }
    }

    /// Distance between this city and another, in kilometres.
    pub fn distance_to(&self, other: &City) -> f64 {
        self.location.distance_to(&other.location)
    }
}
