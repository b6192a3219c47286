use indicatif::ProgressBar;
use petgraph::graph::NodeIndex;
use petgraph::visit::IntoNodeReferences;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::common::graph_data::{
    EdgeData, NetworkGraph, NodeData, euclidean_distance,
};
use crate::error::{Error, Result};
use crate::loading::geojson::Polyline;

/// Fetch the index for the provided coordinates, adding a new node to the
/// graph if they have not been seen before
fn get_or_add_node(
    graph: &mut NetworkGraph,
    node_inx_map: &mut FxHashMap<(u64, u64), NodeIndex>,
    coords: NodeData,
) -> NodeIndex {
    *node_inx_map
        .entry(coords.key())
        .or_insert_with(|| graph.add_node(coords))
}

/// Check that a polyline can be turned into at least one edge, and that all
/// of its coordinates are usable
fn validate_polyline(polyline: &Polyline, index: usize) -> Result<()> {
    if polyline.len() < 2 {
        return Err(Error::MalformedGeometry {
            index,
            reason: format!(
                "expected at least 2 coordinates, got {}",
                polyline.len()
            ),
        });
    }

    if let Some(bad) = polyline
        .iter()
        .find(|coords| !(coords.lon.is_finite() && coords.lat.is_finite()))
    {
        return Err(Error::MalformedGeometry {
            index,
            reason: format!("non-finite coordinate {:?}", bad),
        });
    }

    Ok(())
}

/// Based on the polylines which make up the network, generate an undirected
/// petgraph graph which can be used for route plotting. Each consecutive pair
/// of coordinates becomes an edge, weighted by the straight line distance
/// between them.
///
/// Repeated segments do not create parallel edges, the weight of the last
/// one seen is kept. Zero length segments are skipped so that the graph never
/// contains self loops.
pub fn create_graph(polylines: Vec<Polyline>) -> Result<NetworkGraph> {
    if polylines.is_empty() {
        return Err(Error::EmptyGeometry);
    }

    // Set up empty graph
    let mut graph = NetworkGraph::default();

    // Mapping from exact coordinates to node indexes
    let mut node_inx_map = FxHashMap::<(u64, u64), NodeIndex>::default();

    let bar = ProgressBar::new(polylines.len() as u64);

    for (index, polyline) in polylines.iter().enumerate() {
        validate_polyline(polyline, index)?;

        for pair in polyline.windows(2) {
            let (src, dst) = (pair[0], pair[1]);

            let src_inx = get_or_add_node(&mut graph, &mut node_inx_map, src);
            let dst_inx = get_or_add_node(&mut graph, &mut node_inx_map, dst);

            if src_inx == dst_inx {
                continue;
            }

            let edge_data = EdgeData {
                distance: euclidean_distance(&src, &dst),
            };
            graph.update_edge(src_inx, dst_inx, edge_data);
        }

        bar.inc(1);
    }

    bar.finish_and_clear();

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        polylines = polylines.len(),
        "network graph created"
    );

    Ok(graph)
}

/// Determine the closest node in the graph to the provided coordinates. This
/// is a linear scan over every node, which is fine for a regional network
/// but will not scale to a global one. When two nodes are equally close, the
/// one added to the graph first wins.
pub fn snap_to_nearest_node(
    graph: &NetworkGraph,
    coords: &NodeData,
) -> Result<NodeIndex> {
    // Set variables to keep track of the current closest node
    let mut smallest_dist = f64::INFINITY;
    let mut closest_inx: Option<NodeIndex> = None;

    for (node_inx, node_data) in graph.node_references() {
        let dist = euclidean_distance(coords, node_data);

        // Store details of new closest node if applicable
        if closest_inx.is_none() || dist < smallest_dist {
            smallest_dist = dist;
            closest_inx = Some(node_inx);
        }
    }

    match closest_inx {
        Some(inx) => {
            debug!(
                lon = coords.lon,
                lat = coords.lat,
                node = inx.index(),
                dist = smallest_dist,
                "snapped to nearest node"
            );
            Ok(inx)
        }
        None => Err(Error::NotFound),
    }
}
