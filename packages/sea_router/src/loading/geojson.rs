//! Reads the shipping lane geometry from a GeoJSON document. Every
//! LineString becomes one polyline, every part of a MultiLineString becomes
//! a polyline of its own. Anything else is treated as malformed input, as the
//! network is expected to consist only of lines.

use std::fs;
use std::path::Path;

use geojson::{Feature, GeoJson, Geometry, Value};
use tracing::{debug, info};

use crate::common::graph_data::NodeData;
use crate::error::{Error, Result};

/// An ordered sequence of coordinates, consecutive pairs of which will become
/// edges in the graph
pub type Polyline = Vec<NodeData>;

/// Read and parse the GeoJSON file at the provided path
pub fn load_polylines(path: &Path) -> Result<Vec<Polyline>> {
    info!(path = %path.display(), "reading network geometry");
    let raw = fs::read_to_string(path)?;
    parse_polylines(&raw)
}

/// Parse a GeoJSON document held in memory. FeatureCollections, single
/// Features and bare Geometries are all accepted
pub fn parse_polylines(raw: &str) -> Result<Vec<Polyline>> {
    let document: GeoJson = raw.parse()?;

    let mut polylines = Vec::<Polyline>::new();
    match document {
        GeoJson::FeatureCollection(collection) => {
            for (index, feature) in collection.features.iter().enumerate() {
                extend_from_feature(&mut polylines, feature, index)?;
            }
        }
        GeoJson::Feature(feature) => {
            extend_from_feature(&mut polylines, &feature, 0)?
        }
        GeoJson::Geometry(geometry) => {
            extend_from_geometry(&mut polylines, &geometry, 0)?
        }
    }

    debug!(count = polylines.len(), "parsed polylines");
    Ok(polylines)
}

fn extend_from_feature(
    polylines: &mut Vec<Polyline>,
    feature: &Feature,
    index: usize,
) -> Result<()> {
    match &feature.geometry {
        Some(geometry) => extend_from_geometry(polylines, geometry, index),
        None => Err(Error::MalformedGeometry {
            index,
            reason: "feature has no geometry".to_string(),
        }),
    }
}

fn extend_from_geometry(
    polylines: &mut Vec<Polyline>,
    geometry: &Geometry,
    index: usize,
) -> Result<()> {
    match &geometry.value {
        Value::LineString(positions) => {
            polylines.push(convert_positions(positions, index)?);
        }
        Value::MultiLineString(parts) => {
            for positions in parts {
                polylines.push(convert_positions(positions, index)?);
            }
        }
        other => {
            let kind = match other {
                Value::Point(_) => "Point",
                Value::MultiPoint(_) => "MultiPoint",
                Value::Polygon(_) => "Polygon",
                Value::MultiPolygon(_) => "MultiPolygon",
                Value::GeometryCollection(_) => "GeometryCollection",
                _ => "unknown",
            };
            return Err(Error::MalformedGeometry {
                index,
                reason: format!("unsupported geometry type {kind}"),
            });
        }
    }
    Ok(())
}

/// GeoJSON positions are ordered longitude first, any altitude is dropped
fn convert_positions(positions: &[Vec<f64>], index: usize) -> Result<Polyline> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok(NodeData::new(*lon, *lat)),
            _ => Err(Error::MalformedGeometry {
                index,
                reason: "position has fewer than two ordinates".to_string(),
            }),
        })
        .collect()
}
