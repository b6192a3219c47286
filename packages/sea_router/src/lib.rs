//! Compares Dijkstra, A* and Bellman-Ford over a shipping lane network built
//! from line geometry. Each query snaps two named ports onto the network,
//! runs every algorithm in turn, and reports the path, time taken and memory
//! footprint of each along with the fastest of the three.

pub mod common;
pub mod error;
pub mod loading;
pub mod routing;

pub use error::{Error, Result};
pub use routing::query::{ComparisonCache, Network};
