use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::common::graph_data::NetworkGraph;
use crate::error::{Error, Result};
use crate::routing::common::{Algorithm, Search, reconstruct_path};
use crate::routing::structs::metrics::SearchStats;

/// Shortest distances and predecessors from a single source to every node
/// in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub distances: Vec<f64>,
    pub parents: Vec<Option<NodeIndex>>,
    pub passes: usize,
    pub relaxations: usize,
}

/// Try to improve the distance to `to` by going via `from`
fn relax(
    paths: &mut ShortestPaths,
    from: NodeIndex,
    to: NodeIndex,
    distance: f64,
) -> bool {
    let via = paths.distances[from.index()] + distance;
    if via < paths.distances[to.index()] {
        paths.distances[to.index()] = via;
        paths.parents[to.index()] = Some(from);
        paths.relaxations += 1;
        true
    } else {
        false
    }
}

/// Relax every edge of the graph in both directions, reporting whether any
/// distance was improved
fn relax_all_edges(graph: &NetworkGraph, paths: &mut ShortestPaths) -> bool {
    let mut changed = false;
    for eref in graph.edge_references() {
        let (a, b) = (eref.source(), eref.target());
        let distance = eref.weight().distance;
        changed |= relax(paths, a, b, distance);
        changed |= relax(paths, b, a, distance);
    }
    changed
}

/// Compute shortest paths from the source to all nodes by repeatedly relaxing
/// every edge, up to |V| - 1 times. Stops early once a full pass makes no
/// changes. If a distance can still be improved after the final pass, the
/// graph contains a negative cycle.
pub fn bellman_ford(
    graph: &NetworkGraph,
    source: NodeIndex,
) -> Result<ShortestPaths> {
    let node_count = graph.node_count();
    let mut paths = ShortestPaths {
        distances: vec![f64::INFINITY; node_count],
        parents: vec![None; node_count],
        passes: 0,
        relaxations: 0,
    };
    paths.distances[source.index()] = 0.0;

    let mut converged = false;
    for _ in 1..node_count {
        paths.passes += 1;
        if !relax_all_edges(graph, &mut paths) {
            converged = true;
            break;
        }
    }

    if !converged && relax_all_edges(graph, &mut paths) {
        return Err(Error::NegativeCycle {
            algorithm: Algorithm::BellmanFord,
        });
    }

    Ok(paths)
}

/// Run Bellman-Ford from the source, then extract the path to the goal from
/// the predecessors it leaves behind. All distances are computed whatever the
/// goal is, which is what makes this so much slower than the other two
/// algorithms. It only exists in order to be compared against them
pub fn find_route_bellman_ford(
    graph: &NetworkGraph,
    source: NodeIndex,
    goal: NodeIndex,
) -> Result<Search> {
    let paths = bellman_ford(graph, source)?;

    let nodes = reconstruct_path(&paths.parents, source, goal).ok_or(
        Error::NoPath {
            algorithm: Algorithm::BellmanFord,
        },
    )?;

    let stats = SearchStats {
        expanded: paths.distances.iter().filter(|d| d.is_finite()).count(),
        relaxations: paths.relaxations,
        passes: paths.passes,
    };

    Ok(Search {
        nodes,
        cost: paths.distances[goal.index()],
        stats,
    })
}
