//! Defines a struct to represent a bounding box, which is used to represent
//! a 2d rectangle on the planet's surface. This is used when handing a
//! completed route over to a map, as it can be used to set the viewport

use serde::Serialize;

use crate::common::graph_data::NodeData;

/// A bounding box for geographical data. Contains the minimum and maximum
/// latitudes & longitudes, defining a 'rectangle' on the surface of the Earth
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BBox {
    /// Create the smallest bounding box which contains every point on the
    /// provided path. Returns None for an empty path
    pub fn from_path(path: &[NodeData]) -> Option<Self> {
        let first = path.first()?;

        let init = BBox {
            min_lat: first.lat,
            min_lon: first.lon,
            max_lat: first.lat,
            max_lon: first.lon,
        };

        Some(path.iter().fold(init, |bbox, point| BBox {
            min_lat: bbox.min_lat.min(point.lat),
            min_lon: bbox.min_lon.min(point.lon),
            max_lat: bbox.max_lat.max(point.lat),
            max_lon: bbox.max_lon.max(point.lon),
        }))
    }

    /// Midpoint of the box, used to centre the map on a route
    pub fn get_centre(&self) -> NodeData {
        NodeData::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}
