//! Per-year route graphs.
//!
//! # Overview
//!
//! This module turns the multi-year record set into a petgraph-based
//! directed graph for one year and then restricts it to airports with known
//! coordinates. The cleaned graph feeds every centrality metric.
//!
//! ## Pipeline
//!
//! ```text
//! RouteRecords (multi-year, immutable)
//!        ↓  build::extract_year(records, year)
//! YearGraph (DiGraph<String, Route>)
//!        ↓  clean::clean(&year_graph, &gps_table)
//! AirportNetwork (DiGraph<Airport, Route>, every node geo-located)
//!        ↓  stats::NetworkStats::from_network()
//! NetworkStats (airports, routes, passengers, density, components)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use flightnet::graph::{build::extract_year, clean::clean, stats::NetworkStats};
//!
//! let year_graph = extract_year(&records, 2015);
//! let network = clean(&year_graph, &gps_table);
//! let stats = NetworkStats::from_network(&network);
//!
//! println!("airports={} routes={} density={:.3}",
//!     stats.airport_count, stats.route_count, stats.density);
//! ```

pub mod build;
pub mod clean;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::{Route, YearGraph, extract_year};
pub use clean::{Airport, AirportNetwork, clean};
pub use stats::NetworkStats;
