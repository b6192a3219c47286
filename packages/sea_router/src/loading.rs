//! This module focuses on reading in the shipping lane geometry and port
//! table, and using them to generate a petgraph graph object.

pub mod geojson;
pub mod petgraph;
pub mod ports;

use tracing::info;

use crate::common::config::ServiceConfig;
use crate::error::Result;
use crate::loading::geojson::load_polylines;
use crate::loading::petgraph::create_graph;
use crate::loading::ports::PortRegistry;
use crate::routing::query::Network;

/// Load everything a query needs, according to the service configuration.
/// Any error here is a load error, and should stop the service from starting
pub fn load_network(config: &ServiceConfig) -> Result<Network> {
    let polylines = load_polylines(&config.geojson_path)?;
    let graph = create_graph(polylines)?;

    let ports = match &config.ports_path {
        Some(path) => PortRegistry::from_path(path)?,
        None => PortRegistry::default_ports(),
    };
    info!(ports = ports.len(), "port registry ready");

    Ok(Network::new(graph, ports))
}
