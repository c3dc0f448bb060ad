//! Tunable constants for the route pipeline.
//!
//! Every field has a documented default and may be overridden from a TOML
//! file. Missing keys fall back to their defaults, so a config file only
//! needs the values it changes:
//!
//! ```toml
//! edge_trim = 1000
//!
//! [bounds]
//! max_lat = 49.5
//!
//! [pagerank]
//! damping = 0.9
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::metrics::eigenvector::EigenvectorConfig;
use crate::metrics::pagerank::PageRankConfig;

/// Pipeline configuration injected into [`crate::pipeline::Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Origin/destination codes dropped before graph construction
    /// (seaplane bases and non-mainland fields).
    #[serde(default = "default_excluded_codes")]
    pub excluded_codes: Vec<String>,
    /// Only airport records from this country are kept.
    #[serde(default = "default_country")]
    pub country: String,
    /// Continental bounding box applied to airport coordinates.
    #[serde(default)]
    pub bounds: BoundingBox,
    /// Number of heaviest routes kept by the trimmed route table.
    #[serde(default = "default_edge_trim")]
    pub edge_trim: usize,
    /// Row count of the top-centrality tables.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            excluded_codes: default_excluded_codes(),
            country: default_country(),
            bounds: BoundingBox::default(),
            edge_trim: default_edge_trim(),
            top_k: default_top_k(),
            pagerank: PageRankConfig::default(),
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

/// Open latitude/longitude rectangle. A point on the border is outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default = "default_min_lat")]
    pub min_lat: f64,
    #[serde(default = "default_max_lat")]
    pub max_lat: f64,
    #[serde(default = "default_min_long")]
    pub min_long: f64,
    #[serde(default = "default_max_long")]
    pub max_long: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min_lat: default_min_lat(),
            max_lat: default_max_lat(),
            min_long: default_min_long(),
            max_long: default_max_long(),
        }
    }
}

impl BoundingBox {
    /// Return `true` if the point lies strictly inside the box.
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude > self.min_lat
            && latitude < self.max_lat
            && longitude > self.min_long
            && longitude < self.max_long
    }
}

fn default_excluded_codes() -> Vec<String> {
    ["SPB", "SSB", "AIK", "PCA"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_country() -> String {
    "USA".to_string()
}

const fn default_min_lat() -> f64 {
    20.0
}

const fn default_max_lat() -> f64 {
    50.0
}

const fn default_min_long() -> f64 {
    -130.0
}

const fn default_max_long() -> f64 {
    -60.0
}

const fn default_edge_trim() -> usize {
    2500
}

const fn default_top_k() -> usize {
    10
}

/// Read a [`NetworkConfig`] from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// this schema.
pub fn load_config(path: &Path) -> Result<NetworkConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<NetworkConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
