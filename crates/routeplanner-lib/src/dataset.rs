//! Loading the route network from CSV files.
//!
//! A data directory holds two files:
//!
//! - `cities.csv` with columns `name,country,population,latitude,longitude`
//! - `links.csv` with columns `from,to,mode[,distance]`
//!
//! A link without a distance is weighted by the great-circle distance between
//! its two cities.

use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::city::{City, Location};
use crate::error::{Error, Result};
use crate::graph::RouteNetwork;
use crate::link::TransportMode;

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "ROUTEPLANNER_DATA_DIR";

/// Data directory used when neither an explicit path nor the environment
/// variable is set.
pub const DEFAULT_DATA_DIR: &str = "data";

pub const CITIES_FILENAME: &str = "cities.csv";
pub const LINKS_FILENAME: &str = "links.csv";

/// Locations of the network data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPaths {
    pub cities: PathBuf,
    pub links: PathBuf,
}

impl NetworkPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cities: dir.join(CITIES_FILENAME),
            links: dir.join(LINKS_FILENAME),
        }
    }
}

/// Resolve the data directory: explicit override, then [`DATA_DIR_ENV`],
/// then [`DEFAULT_DATA_DIR`].
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env::var_os(DATA_DIR_ENV) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    population: Option<u64>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LinkRecord {
    from: String,
    to: String,
    mode: String,
    #[serde(default)]
    distance: Option<f64>,
}

/// Read cities from CSV.
pub fn load_cities_from_reader<R: Read>(reader: R) -> Result<Vec<City>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut cities = Vec::new();

    for (index, record) in csv_reader.deserialize::<CityRecord>().enumerate() {
        let record = record?;
        // header is line 1
        let line = index + 2;
        if record.name.is_empty() {
            return Err(Error::DataValidation {
                message: format!("{CITIES_FILENAME} line {line}: empty city name"),
            });
        }
        if !(-90.0..=90.0).contains(&record.latitude)
            || !(-180.0..=180.0).contains(&record.longitude)
        {
            return Err(Error::DataValidation {
                message: format!(
                    "{CITIES_FILENAME} line {line}: coordinates ({}, {}) out of range for {}",
                    record.latitude, record.longitude, record.name
                ),
            });
        }
        cities.push(City::new(
            record.name,
            record.country,
            record.population.unwrap_or_default(),
            Location::new(record.latitude, record.longitude),
        ));
    }

    debug!(count = cities.len(), "loaded cities");
    Ok(cities)
}

/// Build a network from a cities CSV and a links CSV.
pub fn load_network_from_readers<C: Read, L: Read>(cities: C, links: L) -> Result<RouteNetwork> {
    let cities = load_cities_from_reader(cities)?;
    let mut builder = RouteNetwork::builder().cities(cities);

    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(links);
    let mut count = 0usize;
    for record in csv_reader.deserialize::<LinkRecord>() {
        let record = record?;
        let mode: TransportMode = record.mode.parse()?;
        builder.push_link(record.from, record.to, record.distance, mode);
        count += 1;
    }
    debug!(count, "loaded links");

    builder.build()
}

/// Load the network from the standard files inside `data_dir`.
pub fn load_network(data_dir: &Path) -> Result<RouteNetwork> {
    load_network_from_paths(&NetworkPaths::in_dir(data_dir))
}

/// Load the network from explicit file paths.
pub fn load_network_from_paths(paths: &NetworkPaths) -> Result<RouteNetwork> {
    for path in [&paths.cities, &paths.links] {
        if !path.is_file() {
            return Err(Error::DataNotFound { path: path.clone() });
        }
    }

    let cities = fs::File::open(&paths.cities)?;
    let links = fs::File::open(&paths.links)?;
    let network = load_network_from_readers(cities, links)?;
    info!(
        cities = network.cities().len(),
        links = network.links().len(),
        path = %paths.cities.display(),
        "loaded route network"
    );
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &str = "\
name,country,population,latitude,longitude
Bern, Switzerland, 134000, 46.95, 7.44
Zürich,Switzerland,421000,47.37,8.54
Basel,Switzerland,,47.56,7.59
";

    #[test]
    fn loads_cities_with_optional_population() {
        let cities = load_cities_from_reader(CITIES.as_bytes()).unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0].name, "Bern");
        assert_eq!(cities[0].country, "Switzerland");
        assert_eq!(cities[2].population, 0);
        assert_eq!(cities[1].location, Location::new(47.37, 8.54));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let data = "name,country,population,latitude,longitude\nNowhere,X,1,95.0,0.0\n";
        let err = load_cities_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataValidation { message } if message.contains("line 2")));
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let data = "name,country,population,latitude,longitude\nBern,CH,1,north,7.0\n";
        assert!(matches!(
            load_cities_from_reader(data.as_bytes()),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn links_without_distance_use_geometry() {
        let links = "from,to,mode,distance\nBern,Zürich,rail,\nBern,Basel,car,98.5\n";
        let network = load_network_from_readers(CITIES.as_bytes(), links.as_bytes()).unwrap();

        let rail = network.links()[0];
        let cities = network.cities();
        assert_eq!(rail.mode, TransportMode::Rail);
        assert_eq!(rail.distance, cities[0].distance_to(&cities[1]));
        assert_eq!(network.links()[1].distance, 98.5);
    }

    #[test]
    fn distance_column_is_optional() {
        let links = "from,to,mode\nBern,Zürich,train\n";
        let network = load_network_from_readers(CITIES.as_bytes(), links.as_bytes()).unwrap();
        assert_eq!(network.links().len(), 1);
        assert_eq!(network.links()[0].mode, TransportMode::Rail);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let links = "from,to,mode\nBern,Zürich,hovercraft\n";
        let err = load_network_from_readers(CITIES.as_bytes(), links.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnknownTransportMode { value } if value == "hovercraft"));
    }

    #[test]
    fn unknown_link_city_is_rejected() {
        let links = "from,to,mode\nBern,Genf,car\n";
        let err = load_network_from_readers(CITIES.as_bytes(), links.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnknownLinkEndpoint { name } if name == "Genf"));
    }

    #[test]
    fn missing_files_report_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_network(dir.path()).unwrap_err();
        assert!(matches!(err, Error::DataNotFound { path } if path.ends_with(CITIES_FILENAME)));
    }

    #[test]
    fn loads_network_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CITIES_FILENAME), CITIES).unwrap();
        fs::write(dir.path().join(LINKS_FILENAME), "from,to,mode\nBern,Basel,car\n").unwrap();
        let network = load_network(dir.path()).unwrap();
        assert_eq!(network.cities().len(), 3);
        assert_eq!(network.links().len(), 1);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let explicit = Path::new("/tmp/routeplanner-explicit");
        assert_eq!(resolve_data_dir(Some(explicit)), explicit.to_path_buf());
    }
}
