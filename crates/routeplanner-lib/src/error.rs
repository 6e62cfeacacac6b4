use std::path::PathBuf;

use thiserror::Error;

use crate::link::TransportMode;

/// Convenient result alias for the route planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a city name could not be found in the network.
    #[error("unknown city name: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the network has no links or no cities to search over.
    #[error("route network is empty")]
    EmptyNetwork,

    /// Raised when no route could be found between two cities.
    #[error("no route found between {from} and {to} by {mode}")]
    RouteNotFound {
        from: String,
        to: String,
        mode: TransportMode,
    },

    /// Raised when two cities share the same name.
    #[error("duplicate city name encountered: {name}")]
    DuplicateCity { name: String },

    /// Raised when a link references a city that is not part of the network.
    #[error("link references unknown city: {name}")]
    UnknownLinkEndpoint { name: String },

    /// Raised when a link weight is negative or not finite.
    #[error("invalid distance {distance} for link {from} - {to}")]
    InvalidLinkWeight {
        from: String,
        to: String,
        distance: f64,
    },

    /// Raised when a transport mode string does not name a known mode.
    #[error("unknown transport mode: {value}")]
    UnknownTransportMode { value: String },

    /// Raised when a requested routing option is not recognised.
    #[error("unsupported route option: {option}")]
    UnsupportedRouteOption { option: String },

    /// Raised when a data file fails validation.
    #[error("invalid network data: {message}")]
    DataValidation { message: String },

    /// Raised when a network data file could not be located.
    #[error("network data not found at {path}")]
    DataNotFound { path: PathBuf },

    /// Raised when a background search task failed to complete.
    #[error("route search task failed: {message}")]
    TaskJoin { message: String },

    /// Raised when a background search task was cancelled before finishing.
    #[error("route search was cancelled")]
    Cancelled,

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// `true` when the error means an endpoint name failed to resolve.
    pub fn is_unknown_city(&self) -> bool {
        matches!(self, Error::UnknownCity { .. })
    }

    /// `true` when both endpoints resolved but no route connects them.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::RouteNotFound { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
