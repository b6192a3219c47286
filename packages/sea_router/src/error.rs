//! Errors raised while loading the shipping network and answering route
//! comparison queries. Load-time variants abort startup, everything else is
//! reported back to the caller as part of the query outcome.

use serde::Serialize;
use thiserror::Error;

use crate::routing::common::Algorithm;

/// Convenient result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The geometry source did not contain a single polyline
    #[error("geometry source contained no polylines")]
    EmptyGeometry,

    /// A polyline could not be turned into graph edges
    #[error("malformed geometry in polyline {index}: {reason}")]
    MalformedGeometry { index: usize, reason: String },

    /// The geometry file was not valid GeoJSON
    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    /// A port seed file contained the same name twice
    #[error("port {name} is listed more than once")]
    DuplicatePort { name: String },

    /// An environment setting could not be parsed
    #[error("invalid value for {key}: {value}")]
    Config { key: String, value: String },

    /// The requested port name is not in the registry
    #[error("unknown port name: {name}")]
    InvalidInput { name: String },

    /// Snapping was attempted against a graph with no vertices
    #[error("the network graph has no vertices to snap to")]
    NotFound,

    /// The snapped destination cannot be reached from the snapped source
    #[error("{algorithm} found no path between the requested ports")]
    NoPath { algorithm: Algorithm },

    /// Bellman-Ford could still relax an edge after |V| - 1 passes
    #[error("{algorithm} detected a negative weight cycle")]
    NegativeCycle { algorithm: Algorithm },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error belongs to the set which must abort startup
    /// rather than being reported against a single query
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyGeometry
                | Error::MalformedGeometry { .. }
                | Error::GeoJson(_)
                | Error::DuplicatePort { .. }
                | Error::Config { .. }
                | Error::Io(_)
                | Error::Json(_)
        )
    }

    /// Short machine-readable tag for the error, used when outcomes are
    /// serialized for rendering adapters
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput { .. } => ErrorKind::InvalidInput,
            Error::NotFound => ErrorKind::NotFound,
            Error::NoPath { .. } => ErrorKind::NoPath,
            Error::NegativeCycle { .. } => ErrorKind::NegativeCycle,
            _ => ErrorKind::LoadError,
        }
    }
}

/// Tagged form of [`Error`] which can be sent across the API boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    LoadError,
    InvalidInput,
    NotFound,
    NoPath,
    NegativeCycle,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only the startup errors should be classified as fatal
    #[test]
    fn test_is_load_error() {
        assert!(Error::EmptyGeometry.is_load_error());
        assert!(
            Error::MalformedGeometry {
                index: 0,
                reason: "too short".to_string()
            }
            .is_load_error()
        );
        assert!(
            !Error::InvalidInput {
                name: "Atlantis".to_string()
            }
            .is_load_error()
        );
        assert!(!Error::NotFound.is_load_error());
        assert!(
            !Error::NoPath {
                algorithm: Algorithm::AStar
            }
            .is_load_error()
        );
    }

    /// Check that the error message names the algorithm which failed
    #[test]
    fn test_no_path_message() {
        let err = Error::NoPath {
            algorithm: Algorithm::BellmanFord,
        };
        assert_eq!(
            err.to_string(),
            "Bellman-Ford found no path between the requested ports"
        );
        assert_eq!(err.kind(), ErrorKind::NoPath);
    }
}
