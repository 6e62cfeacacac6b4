use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::city::CityId;
use crate::error::Error;

/// Transport mode partitioning the link set into disjoint subgraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Ship,
    Rail,
    Flight,
    Car,
    Bus,
    Tram,
}

impl TransportMode {
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Ship,
        TransportMode::Rail,
        TransportMode::Flight,
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Tram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Ship => "ship",
            TransportMode::Rail => "rail",
            TransportMode::Flight => "flight",
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Tram => "tram",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mode = match value.trim().to_ascii_lowercase().as_str() {
            "ship" | "boat" | "ferry" => TransportMode::Ship,
            "rail" | "train" => TransportMode::Rail,
            "flight" | "plane" | "air" => TransportMode::Flight,
            "car" | "road" => TransportMode::Car,
            "bus" => TransportMode::Bus,
            "tram" => TransportMode::Tram,
            _ => {
                return Err(Error::UnknownTransportMode {
                    value: value.to_string(),
                })
            }
        };
        Ok(mode)
    }
}

/// Undirected, weighted connection between two cities under one transport mode.
///
/// `from` and `to` only record the stored orientation; equality ignores it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Link {
    pub from: CityId,
    pub to: CityId,
    pub distance: f64,
    pub mode: TransportMode,
}

impl Link {
    pub fn new(from: CityId, to: CityId, distance: f64, mode: TransportMode) -> Self {
        Self {
            from,
            to,
            distance,
            mode,
        }
    }

    /// `true` if the link joins `a` and `b` in either orientation.
    pub fn connects(&self, a: CityId, b: CityId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint opposite `city`, if `city` is one of the endpoints.
    pub fn other_end(&self, city: CityId) -> Option<CityId> {
        if self.from == city {
            Some(self.to)
        } else if self.to == city {
            Some(self.from)
        } else {
            None
        }
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.distance == other.distance
            && self.connects(other.from, other.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_orientation() {
        let there = Link::new(1, 2, 5.0, TransportMode::Car);
        let back = Link::new(2, 1, 5.0, TransportMode::Car);
        assert_eq!(there, back);
    }

    #[test]
    fn equality_respects_mode_and_weight() {
        let car = Link::new(1, 2, 5.0, TransportMode::Car);
        assert_ne!(car, Link::new(1, 2, 5.0, TransportMode::Rail));
        assert_ne!(car, Link::new(1, 2, 6.0, TransportMode::Car));
        assert_ne!(car, Link::new(1, 3, 5.0, TransportMode::Car));
    }

    #[test]
    fn other_end_follows_either_orientation() {
        let link = Link::new(4, 7, 1.0, TransportMode::Bus);
        assert_eq!(link.other_end(4), Some(7));
        assert_eq!(link.other_end(7), Some(4));
        assert_eq!(link.other_end(5), None);
    }

    #[test]
    fn parses_modes_and_aliases() {
        assert_eq!("Rail".parse::<TransportMode>().unwrap(), TransportMode::Rail);
        assert_eq!("train".parse::<TransportMode>().unwrap(), TransportMode::Rail);
        assert_eq!(" CAR ".parse::<TransportMode>().unwrap(), TransportMode::Car);
        assert!(matches!(
            "teleport".parse::<TransportMode>(),
            Err(Error::UnknownTransportMode { .. })
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.to_string().parse::<TransportMode>().unwrap(), mode);
        }
    }
}
