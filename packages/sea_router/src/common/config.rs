//! This module contains structs which represent configuration, both for the
//! service as a whole (read once from the environment at startup) and for
//! the individual comparisons requested by the end user.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

const GEOJSON_KEY: &str = "SEA_ROUTER_GEOJSON";
const PORTS_KEY: &str = "SEA_ROUTER_PORTS";
const ADDR_KEY: &str = "SEA_ROUTER_ADDR";

const DEFAULT_GEOJSON: &str = "25.geojson";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Settings which apply for the lifetime of the process
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// GeoJSON file containing the shipping lanes
    pub geojson_path: PathBuf,
    /// Optional JSON file which replaces the built in port table
    pub ports_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
}

impl ServiceConfig {
    /// Read the service configuration from environment variables, falling
    /// back to defaults for anything which isn't set
    pub fn from_env() -> Result<ServiceConfig> {
        ServiceConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration using the provided function to look up each
    /// setting
    pub fn from_lookup<F>(lookup: F) -> Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let geojson_path = lookup(GEOJSON_KEY)
            .unwrap_or_else(|| DEFAULT_GEOJSON.to_string())
            .into();

        let ports_path = lookup(PORTS_KEY)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let addr = lookup(ADDR_KEY).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|_| Error::Config {
            key: ADDR_KEY.to_string(),
            value: addr.clone(),
        })?;

        Ok(ServiceConfig {
            geojson_path,
            ports_path,
            bind_addr,
        })
    }
}

/// Stores the user's requested comparison exactly as it is received from
/// the API
#[derive(Deserialize, Debug, PartialEq)]
pub struct UserCompareQuery {
    pub source: String,
    pub destination: String,
}

/// Stores the user's requested comparison in a format which can be used in
/// the rest of this package. Port names have surrounding whitespace removed
#[derive(Debug, Clone, PartialEq)]
pub struct CompareRequest {
    pub source: String,
    pub destination: String,
}

impl From<UserCompareQuery> for CompareRequest {
    fn from(query: UserCompareQuery) -> Self {
        CompareRequest {
            source: query.source.trim().to_string(),
            destination: query.destination.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    /// Check that defaults are used when nothing is set
    #[test]
    fn test_service_config_defaults() {
        let result = ServiceConfig::from_lookup(|_| None).unwrap();

        let target = ServiceConfig {
            geojson_path: PathBuf::from("25.geojson"),
            ports_path: None,
            bind_addr: "0.0.0.0:8000".parse().unwrap(),
        };

        assert_eq!(result, target);
    }

    #[test]
    fn test_service_config_overrides() {
        let mut vars = FxHashMap::<&str, String>::default();
        vars.insert("SEA_ROUTER_GEOJSON", "/data/lanes.geojson".to_string());
        vars.insert("SEA_ROUTER_PORTS", "/data/ports.json".to_string());
        vars.insert("SEA_ROUTER_ADDR", "127.0.0.1:9000".to_string());

        let result =
            ServiceConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(result.geojson_path, PathBuf::from("/data/lanes.geojson"));
        assert_eq!(result.ports_path, Some(PathBuf::from("/data/ports.json")));
        assert_eq!(result.bind_addr.port(), 9000);
    }

    /// A bind address which can't be parsed should be reported, not
    /// silently replaced
    #[test]
    fn test_service_config_bad_addr() {
        let result = ServiceConfig::from_lookup(|key| match key {
            "SEA_ROUTER_ADDR" => Some("localhost".to_string()),
            _ => None,
        });

        match result {
            Err(Error::Config { key, value }) => {
                assert_eq!(key, "SEA_ROUTER_ADDR");
                assert_eq!(value, "localhost");
            }
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    /// Check conversion from UserCompareQuery to CompareRequest trims the
    /// port names
    #[test]
    fn test_user_query_to_request() {
        let query = UserCompareQuery {
            source: " Mumbai".to_string(),
            destination: "Istanbul ".to_string(),
        };

        let result: CompareRequest = query.into();

        let target = CompareRequest {
            source: "Mumbai".to_string(),
            destination: "Istanbul".to_string(),
        };

        assert_eq!(result, target);
    }
}
