use geo::{Distance, Euclidean, Point};
use petgraph::{Graph, Undirected};
use serde::{Deserialize, Serialize};

/// The graph which every path engine runs against. Built once at startup and
/// never mutated afterwards
pub type NetworkGraph = Graph<NodeData, EdgeData, Undirected, u32>;

/// Sets the data which will be stored as weights against each node in the
/// petgraph graph. A node is identified purely by its coordinates, two nodes
/// are only ever merged if their coordinates match exactly
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub lon: f64,
    pub lat: f64,
}

impl NodeData {
    pub fn new(lon: f64, lat: f64) -> Self {
        NodeData { lon, lat }
    }

    /// Key used to deduplicate nodes while the graph is being built. Adding
    /// 0.0 folds -0.0 into 0.0, so the key agrees with float equality
    pub fn key(&self) -> (u64, u64) {
        ((self.lon + 0.0).to_bits(), (self.lat + 0.0).to_bits())
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

impl From<(f64, f64)> for NodeData {
    fn from((lon, lat): (f64, f64)) -> Self {
        NodeData { lon, lat }
    }
}

/// Container for edge metadata stored in the graph. The distance is the
/// planar distance between the two endpoints in degrees, not a geodesic
/// distance
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub distance: f64,
}

/// Straight line distance between two coordinates. Edge weights and the A*
/// heuristic must both come from here, otherwise the heuristic is no longer
/// guaranteed to be admissible
pub fn euclidean_distance(a: &NodeData, b: &NodeData) -> f64 {
    Euclidean::distance(a.to_point(), b.to_point())
}
