//! Year extraction from the multi-year record set.
//!
//! # Overview
//!
//! [`extract_year`] scans every `(origin, destination, year)` key and keeps
//! the ones for the requested year, producing one directed edge per ordered
//! airport pair. Nodes are airport codes, added the first time a kept route
//! mentions them (origin before destination).
//!
//! ## Edge Weights
//!
//! Each [`Route`] carries two weights:
//!
//! - `weight`: the passenger count.
//! - `weight_inv`: `1 / weight`, the cost used by shortest-path metrics.
//!   A route with exactly zero passengers gets `weight_inv = 1` instead of
//!   an infinite cost.
//!
//! ## Duplicates
//!
//! The record set is keyed by `(origin, destination, year)`, so a pair
//! normally appears once per year. If it appears again the later record
//! replaces the earlier edge's attributes.
//!
//! A year with no records yields an empty graph.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::load::passengers::{RouteKey, RouteRecord, RouteRecords};

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// Attributes of one directed route in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Passenger count.
    pub weight: f64,
    /// Shortest-path cost: `1 / weight`, or `1` when `weight` is zero.
    pub weight_inv: f64,
    /// Carrier name as given in the source data.
    pub airlines: String,
}

impl Route {
    /// Build a route from a passenger count, applying the zero guard.
    #[must_use]
    #[allow(clippy::float_cmp)] // only an exact zero divides by zero
    pub fn new(passengers: f64, airlines: impl Into<String>) -> Self {
        let weight_inv = if passengers == 0.0 {
            1.0
        } else {
            1.0 / passengers
        };
        Self {
            weight: passengers,
            weight_inv,
            airlines: airlines.into(),
        }
    }

    /// Traversal weight for walk- and adjacency-based metrics: the
    /// reciprocal of the cost. Equals the passenger count, except that a
    /// zero-passenger route has affinity 1.
    #[must_use]
    pub fn affinity(&self) -> f64 {
        1.0 / self.weight_inv
    }
}

// ---------------------------------------------------------------------------
// YearGraph
// ---------------------------------------------------------------------------

/// Directed route graph for a single year, before geo cleaning.
///
/// Nodes are airport codes. An edge `A → B` means passengers flew from A to
/// B in [`YearGraph::year`].
#[derive(Debug, Clone)]
pub struct YearGraph {
    /// The year this graph was extracted for.
    pub year: i32,
    /// Directed graph: nodes = airport codes, edges = routes.
    pub graph: DiGraph<String, Route>,
    /// Mapping from airport code to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl YearGraph {
    /// Return the number of airports in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of routes in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the `NodeIndex` for an airport code.
    #[must_use]
    pub fn node_index(&self, code: &str) -> Option<NodeIndex> {
        self.node_map.get(code).copied()
    }

    /// Return the route from `origin` to `dest`, if present.
    #[must_use]
    pub fn route(&self, origin: &str, dest: &str) -> Option<&Route> {
        let a = self.node_index(origin)?;
        let b = self.node_index(dest)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }
}

/// Collapse the multi-year records into the directed graph for `year`.
#[must_use]
#[instrument(skip(records))]
pub fn extract_year(records: &RouteRecords, year: i32) -> YearGraph {
    let graph = collect_year(records.iter(), year);

    debug!(
        year,
        airports = graph.node_count(),
        routes = graph.edge_count(),
        "extracted year graph"
    );

    graph
}

/// Build the year graph from `(key, record)` pairs in iteration order.
fn collect_year<'a, I>(entries: I, year: i32) -> YearGraph
where
    I: IntoIterator<Item = (&'a RouteKey, &'a RouteRecord)>,
{
    let mut graph = DiGraph::<String, Route>::new();
    let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

    for (key, record) in entries {
        if key.year != year {
            continue;
        }

        let origin = *node_map
            .entry(key.origin.clone())
            .or_insert_with(|| graph.add_node(key.origin.clone()));
        let dest = *node_map
            .entry(key.dest.clone())
            .or_insert_with(|| graph.add_node(key.dest.clone()));

        let route = Route::new(record.passengers, record.carrier.clone());

        // Last write wins for a repeated pair within the year.
        if let Some(edge) = graph.find_edge(origin, dest) {
            graph[edge] = route;
        } else {
            graph.add_edge(origin, dest, route);
        }
    }

    YearGraph {
        year,
        graph,
        node_map,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
