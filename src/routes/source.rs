//! Route table sources.
//!
//! The host application's route table is an external collaborator; this
//! module provides the seam. Routes come either from the config file
//! itself or from a JSON export produced by the application's own route
//! listing tooling.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::routes::descriptor::RouteDescriptor;

/// Errors reading a route table.
#[derive(Debug, Error)]
pub enum RouteSourceError {
    /// Route export file could not be read.
    #[error("failed to read route file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Route export file is not valid JSON for the expected shape.
    #[error("failed to parse route file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Supplies the registered routes for one reconciliation run.
pub trait RouteSource {
    fn routes(&self) -> Result<Vec<RouteDescriptor>, RouteSourceError>;
}

/// Routes declared inline in the configuration file.
#[derive(Debug, Clone, Default)]
pub struct StaticRouteSource {
    routes: Vec<RouteDescriptor>,
}

impl StaticRouteSource {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }
}

impl RouteSource for StaticRouteSource {
    fn routes(&self) -> Result<Vec<RouteDescriptor>, RouteSourceError> {
        Ok(self.routes.clone())
    }
}

/// Routes loaded from a JSON export file: a top-level array of
/// `{ "methods": [...], "uri": "..." }` objects.
#[derive(Debug, Clone)]
pub struct JsonRouteSource {
    path: PathBuf,
}

impl JsonRouteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RouteSource for JsonRouteSource {
    fn routes(&self) -> Result<Vec<RouteDescriptor>, RouteSourceError> {
        let content = fs::read_to_string(&self.path).map_err(|e| RouteSourceError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| RouteSourceError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }
}
