use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;

use crate::common::graph_data::{NetworkGraph, euclidean_distance};
use crate::error::{Error, Result};
use crate::routing::common::{
    Algorithm, FrontierEntry, Search, neighbours, reconstruct_path,
};
use crate::routing::structs::metrics::SearchStats;

/// Run A* search between two nodes. The frontier is ordered by distance
/// travelled plus the straight line distance to the goal. Edge weights use
/// the same straight line distance, so the estimate never overshoots and the
/// first time the goal is settled its path is optimal
pub fn find_route_a_star(
    graph: &NetworkGraph,
    source: NodeIndex,
    goal: NodeIndex,
) -> Result<Search> {
    let node_count = graph.node_count();
    let mut g_score = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut settled = vec![false; node_count];
    let mut stats = SearchStats::default();

    let goal_data = graph[goal];
    let heuristic =
        |node: NodeIndex| euclidean_distance(&graph[node], &goal_data);

    let mut queue = BinaryHeap::new();
    g_score[source.index()] = 0.0;
    queue.push(FrontierEntry::new(source, heuristic(source)));

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
                    algorithm: Algorithm::AStar,
                },
            )?;
            return Ok(Search {
                nodes,
                cost: g_score[goal.index()],
                stats,
            });
        }

        let current_score = g_score[current.index()];
        for (next, distance) in neighbours(graph, current) {
            if settled[next.index()] {
                continue;
            }

            let tentative_g = current_score + distance;
            if tentative_g < g_score[next.index()] {
                g_score[next.index()] = tentative_g;
                parents[next.index()] = Some(current);
                queue.push(FrontierEntry::new(
                    next,
                    tentative_g + heuristic(next),
                ));
                stats.relaxations += 1;
            }
        }
    }

    Err(Error::NoPath {
        algorithm: Algorithm::AStar,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::routing::common::tests::{
        get_random_graphs, get_square_graph, get_star_graph, get_test_graph,
        node_at,
    };
    use crate::routing::dijkstra::find_route_dijkstra;

    #[test]
    fn test_line() {
        let graph = get_test_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 10.0, 0.0);

        let result = find_route_a_star(&graph, source, goal).unwrap();

        assert_eq!(result.nodes, vec![source, node_at(&graph, 5.0, 0.0), goal]);
        assert_relative_eq!(result.cost, 10.0);
    }

    #[test]
    fn test_takes_shortcut() {
        let graph = get_square_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 1.0, 1.0);

        let result = find_route_a_star(&graph, source, goal).unwrap();

        assert_eq!(result.nodes, vec![source, goal]);
        assert_relative_eq!(result.cost, 2.0_f64.sqrt());
    }

    /// The heuristic should steer the search straight down the eastern
    /// spoke, leaving the others unexplored
    #[test]
    fn test_star_skips_spokes() {
        let graph = get_star_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 3.0, 0.0);

        let result = find_route_a_star(&graph, source, goal).unwrap();

        assert_relative_eq!(result.cost, 3.0);
        assert_eq!(result.stats.expanded, 4);
    }

    /// A* must never expand more nodes than Dijkstra for the same query, and
    /// must agree on the cost
    #[test]
    fn test_expands_no_more_than_dijkstra() {
        for graph in [get_test_graph(), get_star_graph(), get_square_graph()]
        {
            let source = node_at(&graph, 0.0, 0.0);
            for goal in graph.node_indices() {
                let astar = find_route_a_star(&graph, source, goal);
                let dijkstra = find_route_dijkstra(&graph, source, goal);

                match (astar, dijkstra) {
                    (Ok(astar), Ok(dijkstra)) => {
                        assert!(
                            astar.stats.expanded <= dijkstra.stats.expanded
                        );
                        assert_relative_eq!(astar.cost, dijkstra.cost);
                    }
                    (Err(_), Err(_)) => (),
                    _ => panic!("A* and Dijkstra disagree on reachability"),
                }
            }
        }
    }

    /// Same checks as above, between every pair of nodes on seeded random
    /// networks
    #[test]
    fn test_random_graphs_expand_no_more_than_dijkstra() {
        for graph in get_random_graphs() {
            for source in graph.node_indices() {
                for goal in graph.node_indices() {
                    let astar = find_route_a_star(&graph, source, goal);
                    let dijkstra = find_route_dijkstra(&graph, source, goal);

                    match (astar, dijkstra) {
                        (Ok(astar), Ok(dijkstra)) => {
                            assert!(
                                astar.stats.expanded
                                    <= dijkstra.stats.expanded
                            );
                            assert_relative_eq!(
                                astar.cost,
                                dijkstra.cost,
                                epsilon = 1e-9
                            );
                        }
                        (Err(_), Err(_)) => (),
                        _ => panic!("A* and Dijkstra disagree on reachability"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_unreachable() {
        let graph = get_test_graph();
        let source = node_at(&graph, 0.0, 0.0);
        let goal = node_at(&graph, 50.0, 50.0);

        match find_route_a_star(&graph, source, goal) {
            Err(Error::NoPath { algorithm }) => {
                assert_eq!(algorithm, Algorithm::AStar)
            }
            other => panic!("Expected no path, got {other:?}"),
        }
    }
}
