use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;

use crate::common::graph_data::NetworkGraph;
use crate::error::{Error, Result};
use crate::routing::common::{
    Algorithm, FrontierEntry, Search, neighbours, reconstruct_path,
};
use crate::routing::structs::metrics::SearchStats;

/// Run Dijkstra's algorithm to find the lowest cost path between two nodes.
/// Each node is settled at most once, and the search stops as soon as the
/// goal has been settled
pub fn find_route_dijkstra(
    graph: &NetworkGraph,
    source: NodeIndex,
    goal: NodeIndex,
) -> Result<Search> {
    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut settled = vec![false; node_count];
    let mut stats = SearchStats::default();

    let mut queue = BinaryHeap::new();
    distances[source.index()] = 0.0;
    queue.push(FrontierEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if settled[current.index()] {
            continue;
        }
        settled[current.index()] = true;
        stats.expanded += 1;

        if current == goal {
            let nodes = reconstruct_path(&parents, source, goal).ok_or(
                Error::NoPath {
                    algorithm: Algorithm::Dijkstra,
                },
            )?;
            return Ok(Search {
                nodes,
                cost: distances[goal.index()],
                stats,
            });
        }

        let current_distance = distances[current.index()];
        for (next, distance) in neighbours(graph, current) {
            if settled[next.index()] {
                continue;
            }

            let next_distance = current_distance + distance;
            if next_distance < distances[next.index()] {
                distances[next.index()] = next_distance;
                parents[next.index()] = Some(current);
                queue.push(FrontierEntry::new(next, next_distance));
                stats.relaxations += 1;
            }
        }
    }

    Err(Error::NoPath {
        algorithm: Algorithm::Dijkstra,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::common::graph_data::NodeData;
    use crate::routing::common::tests::{
        get_square_graph, get_star_graph, get_test_graph, node_at,
    };

    #[test]
    fn test_line() {
        let graph = get_test_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 10.0, 0.0);

        let result = find_route_dijkstra(&graph, source, goal).unwrap();

        assert_eq!(result.nodes, vec![source, node_at(&graph, 5.0, 0.0), goal]);
        assert_relative_eq!(result.cost, 10.0);
        assert_eq!(result.stats.expanded, 3);
    }

    /// The diagonal is shorter than going round two sides of the square
    #[test]
    fn test_takes_shortcut() {
        let graph = get_square_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 1.0, 1.0);

        let result = find_route_dijkstra(&graph, source, goal).unwrap();

        assert_eq!(result.nodes, vec![source, goal]);
        assert_relative_eq!(result.cost, 2.0_f64.sqrt());
    }

    /// Without a heuristic every spoke of the star gets explored
    #[test]
    fn test_star_expands_everything() {
        let graph = get_star_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 3.0, 0.0);

        let result = find_route_dijkstra(&graph, source, goal).unwrap();

        assert_relative_eq!(result.cost, 3.0);
        assert_eq!(result.stats.expanded, graph.node_count());
    }

    #[test]
    fn test_same_node() {
        let graph = get_test_graph();
        let source = node_at(&graph, 5.0, 0.0);

        let result = find_route_dijkstra(&graph, source, source).unwrap();

        assert_eq!(result.nodes, vec![source]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_unreachable() {
        let graph = get_test_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 51.0, 50.0);

        match find_route_dijkstra(&graph, source, goal) {
            Err(Error::NoPath { algorithm }) => {
                assert_eq!(algorithm, Algorithm::Dijkstra)
            }
            other => panic!("Expected no path, got {other:?}"),
        }
    }

    /// A node with no edges at all can't be reached
    #[test]
    fn test_isolated_node() {
        let mut graph = get_test_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = graph.add_node(NodeData::new(-20.0, -20.0));

        let result = find_route_dijkstra(&graph, source, goal);

        assert!(matches!(result, Err(Error::NoPath { .. })));
    }
}
