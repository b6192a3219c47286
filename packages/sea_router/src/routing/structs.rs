pub mod metrics;

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::common::bbox::BBox;
use crate::common::graph_data::NodeData;
use crate::error::{Error, ErrorKind, Result};
use crate::routing::common::Algorithm;
use crate::routing::structs::metrics::{
    AlgorithmMetrics, SearchStats, serialize_secs,
};

/// Container for the route found by a single algorithm, along with the cost
/// of finding it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub algorithm: Algorithm,
    /// Coordinates from the snapped source to the snapped destination,
    /// inclusive
    pub path: Vec<NodeData>,
    pub cost: f64,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Resident memory of the whole process once the search finished, in
    /// bytes. None where the platform doesn't report it
    pub memory: Option<u64>,
    pub stats: SearchStats,
}

/// Defines the 2 possible outcome states of running an algorithm. A failure
/// in one algorithm has no bearing on the others
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EngineOutcome {
    Found(PathResult),
    Failed { kind: ErrorKind, message: String },
}

impl From<Result<PathResult>> for EngineOutcome {
    fn from(result: Result<PathResult>) -> Self {
        match result {
            Ok(path) => EngineOutcome::Found(path),
            Err(err) => EngineOutcome::from(&err),
        }
    }
}

impl From<&Error> for EngineOutcome {
    fn from(err: &Error) -> Self {
        EngineOutcome::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl EngineOutcome {
    pub fn path_result(&self) -> Option<&PathResult> {
        match self {
            EngineOutcome::Found(path) => Some(path),
            EngineOutcome::Failed { .. } => None,
        }
    }
}

/// Everything produced by a single comparison query. Rendering adapters
/// should be able to draw the map and charts from this alone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub source: String,
    pub destination: String,
    /// Graph nodes which the two ports were snapped to
    pub source_node: NodeData,
    pub destination_node: NodeData,
    pub outcomes: BTreeMap<Algorithm, EngineOutcome>,
    pub fastest: Option<Algorithm>,
    pub verdict: String,
    /// Extent of the winning path, for setting a map viewport
    pub bounds: Option<BBox>,
    /// Point the map should be centred on
    pub centre: Option<NodeData>,
}

impl ComparisonResult {
    pub fn outcome(&self, algorithm: Algorithm) -> Option<&EngineOutcome> {
        self.outcomes.get(&algorithm)
    }

    /// The path found by the fastest algorithm, if any algorithm found one
    pub fn winning_path(&self) -> Option<&[NodeData]> {
        self.fastest
            .and_then(|algorithm| self.outcome(algorithm))
            .and_then(EngineOutcome::path_result)
            .map(|result| result.path.as_slice())
    }

    /// Time and memory for each algorithm which completed, in priority order
    pub fn metrics_table(&self) -> Vec<AlgorithmMetrics> {
        self.outcomes
            .values()
            .filter_map(EngineOutcome::path_result)
            .map(|result| AlgorithmMetrics {
                algorithm: result.algorithm,
                elapsed: result.elapsed,
                memory: result.memory,
            })
            .collect()
    }
}
