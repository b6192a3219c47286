//! Pieces shared by all three path engines: the algorithm labels, the
//! priority queue entry, path reconstruction and the instrumented runner
//! which times each search.

use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::{debug, warn};

use crate::common::graph_data::NetworkGraph;
use crate::error::Result;
use crate::routing::astar::find_route_a_star;
use crate::routing::bellman_ford::find_route_bellman_ford;
use crate::routing::dijkstra::find_route_dijkstra;
use crate::routing::instrument::resident_memory;
use crate::routing::structs::PathResult;
use crate::routing::structs::metrics::SearchStats;

/// The shortest path algorithms being compared. Declaration order doubles
/// as the tie break priority when two algorithms take the same time
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Dijkstra,
    AStar,
    BellmanFord,
}

impl Algorithm {
    /// Every algorithm, in priority order
    pub const ALL: [Algorithm; 3] =
        [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::BellmanFord];

    /// Run the search for this algorithm without any instrumentation
    pub fn search(
        &self,
        graph: &NetworkGraph,
        source: NodeIndex,
        goal: NodeIndex,
    ) -> Result<Search> {
        match self {
            Algorithm::Dijkstra => find_route_dijkstra(graph, source, goal),
            Algorithm::AStar => find_route_a_star(graph, source, goal),
            Algorithm::BellmanFord => {
                find_route_bellman_ford(graph, source, goal)
            }
        }
    }

    /// Label used when announcing this algorithm as the fastest
    pub fn long_name(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::AStar => "A* Algorithm",
            Algorithm::BellmanFord => "Bellman-Ford Algorithm",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::BellmanFord => "Bellman-Ford",
        };
        f.write_str(name)
    }
}

/// Raw output of a single search, before it is timed and converted into
/// coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub nodes: Vec<NodeIndex>,
    pub cost: f64,
    pub stats: SearchStats,
}

/// Run a single algorithm between two nodes which have already been snapped
/// to the graph. The clock only covers the search itself, and resident
/// memory is sampled once the search has returned. This is a whole process
/// figure, so it is only useful for coarse comparisons between algorithms.
pub fn run_algorithm(
    graph: &NetworkGraph,
    algorithm: Algorithm,
    source: NodeIndex,
    goal: NodeIndex,
) -> Result<PathResult> {
    let now = Instant::now();
    let search = algorithm.search(graph, source, goal);
    let elapsed = now.elapsed();
    let memory = resident_memory();

    match search {
        Ok(search) => {
            debug!(
                %algorithm,
                elapsed_us = elapsed.as_micros() as u64,
                memory,
                cost = search.cost,
                expanded = search.stats.expanded,
                "search complete"
            );
            Ok(PathResult {
                algorithm,
                path: search.nodes.iter().map(|inx| graph[*inx]).collect(),
                cost: search.cost,
                elapsed,
                memory,
                stats: search.stats,
            })
        }
        Err(err) => {
            warn!(%algorithm, error = %err, "search failed");
            Err(err)
        }
    }
}

/// Iterate over the neighbours of a node, along with the distance to each.
/// Edges in an undirected graph may be stored either way round, so the far
/// end is worked out explicitly
pub fn neighbours(
    graph: &NetworkGraph,
    node: NodeIndex,
) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
    graph.edges(node).map(move |eref| {
        let next = if eref.source() == node {
            eref.target()
        } else {
            eref.source()
        };
        (next, eref.weight().distance)
    })
}

/// Walk back through the predecessors of each node to recover the path from
/// source to goal. Returns None if the chain is broken before the source is
/// reached
pub fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    source: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != source {
        current = parents.get(current.index()).copied().flatten()?;
        path.push(current);

        // A chain longer than the graph means the predecessors loop
        if path.len() > parents.len() {
            return None;
        }
    }

    path.reverse();
    Some(path)
}

/// Wrapper which gives floats a total ordering, so they can be used as heap
/// priorities
#[derive(Copy, Clone, Debug, Default)]
pub struct FloatOrd(pub f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
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

/// Entry in the search frontier. For Dijkstra the priority is the distance
/// travelled so far, for A* it also includes the estimate to the goal
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FrontierEntry {
    pub node: NodeIndex,
    pub priority: FloatOrd,
}

impl FrontierEntry {
    pub fn new(node: NodeIndex, priority: f64) -> Self {
        Self {
            node,
            priority: FloatOrd(priority),
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
