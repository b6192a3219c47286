//! Entry point for comparison queries. The network graph and port registry
//! are loaded once and shared read-only between queries, every query gets
//! its own results.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::common::bbox::BBox;
use crate::common::config::CompareRequest;
use crate::common::graph_data::NetworkGraph;
use crate::error::Result;
use crate::loading::petgraph::snap_to_nearest_node;
use crate::loading::ports::PortRegistry;
use crate::routing::common::{Algorithm, run_algorithm};
use crate::routing::comparator::{pick_fastest, verdict};
use crate::routing::structs::{ComparisonResult, EngineOutcome};

/// The shipping network and the ports which can be routed between. Cloning
/// is cheap, both halves are reference counted
#[derive(Debug, Clone)]
pub struct Network {
    graph: Arc<NetworkGraph>,
    ports: Arc<PortRegistry>,
}

impl Network {
    pub fn new(graph: NetworkGraph, ports: PortRegistry) -> Self {
        Network {
            graph: Arc::new(graph),
            ports: Arc::new(ports),
        }
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    /// Find a route between two named ports with each algorithm in turn,
    /// and rank them by how long they took. The algorithms are run one after
    /// another on the calling thread so that their timings and memory
    /// samples don't interfere with each other.
    ///
    /// Unknown port names and an empty graph fail the whole query. An
    /// algorithm failing to find a path is recorded in its outcome and does
    /// not stop the others from running.
    pub fn compare_ports(
        &self,
        request: &CompareRequest,
    ) -> Result<ComparisonResult> {
        let source_coords = self.ports.lookup(&request.source)?;
        let destination_coords = self.ports.lookup(&request.destination)?;

        // Snapping happens outside of the timed section for every algorithm
        let source_inx = snap_to_nearest_node(&self.graph, &source_coords)?;
        let destination_inx =
            snap_to_nearest_node(&self.graph, &destination_coords)?;

        let mut outcomes = BTreeMap::<Algorithm, EngineOutcome>::new();
        for algorithm in Algorithm::ALL {
            let result = run_algorithm(
                &self.graph,
                algorithm,
                source_inx,
                destination_inx,
            );
            outcomes.insert(algorithm, result.into());
        }

        let fastest = pick_fastest(&outcomes);
        let verdict = verdict(fastest);

        info!(
            source = %request.source,
            destination = %request.destination,
            fastest = ?fastest,
            "{}", verdict
        );

        let mut result = ComparisonResult {
            source: request.source.clone(),
            destination: request.destination.clone(),
            source_node: self.graph[source_inx],
            destination_node: self.graph[destination_inx],
            outcomes,
            fastest,
            verdict,
            bounds: None,
            centre: None,
        };
        result.bounds = result.winning_path().and_then(BBox::from_path);
        result.centre = result.bounds.as_ref().map(BBox::get_centre);

        Ok(result)
    }
}

/// Holds on to the most recent comparison so it can be viewed again without
/// re-running the algorithms. Starts out empty, and each successful query
/// replaces whatever was there before
#[derive(Debug, Clone, Default)]
pub struct ComparisonCache {
    latest: Arc<RwLock<Option<ComparisonResult>>>,
}

impl ComparisonCache {
    pub fn new() -> Self {
        ComparisonCache::default()
    }

    pub fn replace(&self, result: ComparisonResult) {
        let mut latest =
            self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = Some(result);
    }

    pub fn latest(&self) -> Option<ComparisonResult> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
