//! Static registry of named ports. Lookups are exact and case sensitive, but
//! surrounding whitespace is trimmed from names both when the table is
//! loaded and when it is queried, so "Istanbul" and "Istanbul " resolve to
//! the same port.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::info;

use crate::common::graph_data::NodeData;
use crate::error::{Error, Result};

/// Ports available out of the box, as (name, longitude, latitude)
const DEFAULT_PORTS: [(&str, f64, f64); 15] = [
    ("Mumbai", 72.40000916, 18.99999046),
    ("Chennai", 80.28001071, 13.08998712),
    ("Kolkata", 88.0, 20.99998093),
    ("Kochi", 75.20000763, 9.30000019),
    ("New Mangalore", 74.79998259, 12.89999481),
    ("Thiruvananthapuram", 78.09999748, 8.80000356),
    ("New Haven", -72.91087341, 41.2885704),
    ("Brighton", -0.1742500067, 50.80424118),
    ("Gale", 80.09999847, 5.799990177),
    ("Doha", 51.59999084, 26.2999897),
    ("Libreville", 7.999989986, 0.3487800062),
    ("Istanbul ", 29.10000038, 41.09999084),
    ("Busan", 129.04, 35.1),
    ("Los Angeles", -118.22, 33.7385),
    ("Sydney", 151.2333, -33.95),
];

/// A single entry in a port seed file
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PortRow {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

/// Mapping from port names to coordinates. The coordinates do not need to
/// line up with a node in the graph, they are snapped at query time
#[derive(Debug, Clone, Default)]
pub struct PortRegistry {
    names: Vec<String>,
    coords: FxHashMap<String, NodeData>,
}

impl PortRegistry {
    /// Build a registry from (name, coordinates) pairs, rejecting any name
    /// which appears twice once trimmed
    pub fn new<I>(ports: I) -> Result<PortRegistry>
    where
        I: IntoIterator<Item = (String, NodeData)>,
    {
        let mut registry = PortRegistry::default();

        for (name, coords) in ports {
            let name = name.trim().to_string();
            if registry.coords.contains_key(&name) {
                return Err(Error::DuplicatePort { name });
            }
            registry.names.push(name.clone());
            registry.coords.insert(name, coords);
        }

        Ok(registry)
    }

    /// The built in table of ports
    pub fn default_ports() -> PortRegistry {
        let mut registry = PortRegistry::default();
        for (name, lon, lat) in DEFAULT_PORTS {
            let name = name.trim().to_string();
            registry.names.push(name.clone());
            registry.coords.insert(name, NodeData::new(lon, lat));
        }
        registry
    }

    /// Load a registry from a JSON array of {"name", "lon", "lat"} objects
    pub fn from_path(path: &Path) -> Result<PortRegistry> {
        let raw = fs::read_to_string(path)?;
        let registry = PortRegistry::from_json(&raw)?;
        info!(
            path = %path.display(),
            ports = registry.len(),
            "loaded port registry"
        );
        Ok(registry)
    }

    pub fn from_json(raw: &str) -> Result<PortRegistry> {
        let rows: Vec<PortRow> = serde_json::from_str(raw)?;
        PortRegistry::new(
            rows.into_iter()
                .map(|row| (row.name, NodeData::new(row.lon, row.lat))),
        )
    }

    /// Retrieve the coordinates for a port
    pub fn lookup(&self, name: &str) -> Result<NodeData> {
        self.coords
            .get(name.trim())
            .copied()
            .ok_or_else(|| Error::InvalidInput {
                name: name.to_string(),
            })
    }

    /// Port names, in the order they were registered
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        let registry = PortRegistry::default_ports();

        assert_eq!(registry.len(), 15);
        assert_eq!(registry.names()[0], "Mumbai");
        assert_eq!(
            registry.lookup("Sydney").unwrap(),
            NodeData::new(151.2333, -33.95)
        );
    }

    /// Trailing whitespace in the table or the query should not matter
    #[test]
    fn test_lookup_trims_names() {
        let registry = PortRegistry::default_ports();

        let target = NodeData::new(29.10000038, 41.09999084);

        assert_eq!(registry.lookup("Istanbul").unwrap(), target);
        assert_eq!(registry.lookup("Istanbul ").unwrap(), target);
        assert!(registry.names().contains(&"Istanbul".to_string()));
    }

    /// Lookups are case sensitive, and unknown names are reported back
    #[test]
    fn test_lookup_unknown() {
        let registry = PortRegistry::default_ports();

        match registry.lookup("mumbai") {
            Err(Error::InvalidInput { name }) => assert_eq!(name, "mumbai"),
            other => panic!("Expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json() {
        let raw = r#"[
            {"name": "A", "lon": 0.0, "lat": 0.0},
            {"name": "B ", "lon": 10.0, "lat": 0.0}
        ]"#;

        let registry = PortRegistry::from_json(raw).unwrap();

        assert_eq!(registry.names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(registry.lookup("B").unwrap(), NodeData::new(10.0, 0.0));
    }

    #[test]
    fn test_from_json_duplicate() {
        let raw = r#"[
            {"name": "A", "lon": 0.0, "lat": 0.0},
            {"name": " A", "lon": 1.0, "lat": 1.0}
        ]"#;

        match PortRegistry::from_json(raw) {
            Err(Error::DuplicatePort { name }) => assert_eq!(name, "A"),
            other => panic!("Expected duplicate port, got {other:?}"),
        }
    }
}
