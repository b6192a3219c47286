//! Defines the structs which contain high level information about a search
//! (i.e. how much work it did, how long it took)

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::routing::common::Algorithm;

/// Counters recorded while a search runs. For the heap based algorithms
/// `expanded` is the number of nodes settled before the goal was reached,
/// for Bellman-Ford it is the number of nodes given a finite distance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub expanded: usize,
    pub relaxations: usize,
    /// Full passes over the edge list, only used by Bellman-Ford
    pub passes: usize,
}

/// One row of the table used to chart time and memory for each algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmMetrics {
    pub algorithm: Algorithm,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    pub memory: Option<u64>,
}

/// Durations are sent to consumers as fractional seconds
pub fn serialize_secs<S>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}
