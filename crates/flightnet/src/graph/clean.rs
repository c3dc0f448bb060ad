//! Geo cleaning: keep only airports with known continental coordinates.
//!
//! # Overview
//!
//! Route data mentions airports that the GPS table cannot place (Alaska,
//! Hawaii, territories, closed fields, codes missing from the database).
//! [`clean`] joins every node of a [`YearGraph`] against the [`GpsTable`]:
//!
//! 1. Index the GPS rows whose code appears in the graph, keeping the first
//!    row for a duplicated code.
//! 2. For each node, look the code up. A miss marks the node for removal;
//!    it never fails the operation and no coordinate is ever guessed.
//! 3. Induce the subgraph on the surviving nodes. Routes touching a removed
//!    airport disappear with it.
//! 4. Record each airport's degree (in + out) within the induced graph.
//!
//! Node and edge order of the surviving graph follows the input graph.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use tracing::{debug, instrument};

use crate::graph::build::{Route, YearGraph};
use crate::load::airports::GpsTable;

// ---------------------------------------------------------------------------
// AirportNetwork
// ---------------------------------------------------------------------------

/// A geo-located airport in a cleaned network.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    /// Three-letter airport code.
    pub code: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// In-degree plus out-degree within the cleaned network.
    pub degree: usize,
}

/// A year's route graph restricted to airports with coordinates.
#[derive(Debug, Clone)]
pub struct AirportNetwork {
    /// The year the routes were flown.
    pub year: i32,
    /// Directed graph: nodes = airports, edges = routes.
    pub graph: DiGraph<Airport, Route>,
    /// Mapping from airport code to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl AirportNetwork {
    /// Return the number of airports in the network.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of routes in the network.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up an airport by code.
    #[must_use]
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.node_map
            .get(code)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Return the route from `origin` to `dest`, if both survived cleaning.
    #[must_use]
    pub fn route(&self, origin: &str, dest: &str) -> Option<&Route> {
        let a = *self.node_map.get(origin)?;
        let b = *self.node_map.get(dest)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }
}

/// Drop airports without a GPS record and induce the surviving subgraph.
#[must_use]
#[instrument(skip(year_graph, gps), fields(year = year_graph.year))]
pub fn clean(year_graph: &YearGraph, gps: &GpsTable) -> AirportNetwork {
    let wanted: HashSet<&str> = year_graph
        .graph
        .node_weights()
        .map(String::as_str)
        .collect();
    let index = gps.index_codes(&wanted);

    let mut no_gps: Vec<&str> = Vec::new();
    let mut graph = year_graph.graph.filter_map(
        |_, code| match index.get(code.as_str()) {
            Some(record) => Some(Airport {
                code: code.clone(),
                city: record.city.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                degree: 0,
            }),
            None => {
                no_gps.push(code.as_str());
                None
            }
        },
        |_, route| Some(route.clone()),
    );

    for idx in graph.node_indices() {
        let degree = graph.edges_directed(idx, Direction::Outgoing).count()
            + graph.edges_directed(idx, Direction::Incoming).count();
        graph[idx].degree = degree;
    }

    let node_map: HashMap<String, NodeIndex> = graph
        .node_indices()
        .map(|idx| (graph[idx].code.clone(), idx))
        .collect();

    debug!(
        airports = graph.node_count(),
        routes = graph.edge_count(),
        dropped = no_gps.len(),
        dropped_routes = year_graph.edge_count() - graph.edge_count(),
        "cleaned year graph"
    );

    AirportNetwork {
        year: year_graph.year,
        graph,
        node_map,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundingBox;
    use crate::graph::build::extract_year;
    use crate::load::airports::AirportRecord;
    use crate::load::passengers::{PassengerRow, RouteRecords};

    fn year_graph(rows: &[(&str, &str, f64)]) -> YearGraph {
        let rows = rows
            .iter()
            .map(|(a, b, p)| PassengerRow::new(a, b, 2015, *p, "Carrier"));
        extract_year(&RouteRecords::from_rows(rows, &[]), 2015)
    }

    fn gps(records: Vec<AirportRecord>) -> GpsTable {
        GpsTable::from_records(records, "USA", &BoundingBox::default())
    }

    #[test]
    fn all_known_airports_are_kept() {
        let g = year_graph(&[("A", "B", 100.0), ("B", "C", 50.0), ("A", "C", 0.0)]);
        let table = gps(vec![
            AirportRecord::us("A", "Alpha", 40.0, -100.0),
            AirportRecord::us("B", "Bravo", 41.0, -95.0),
            AirportRecord::us("C", "Charlie", 35.0, -90.0),
        ]);

        let net = clean(&g, &table);
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 3);

        let a = net.airport("A").expect("A kept");
        assert_eq!(a.city, "Alpha");
        assert!((a.latitude - 40.0).abs() < f64::EPSILON);
        assert!((a.longitude + 100.0).abs() < f64::EPSILON);
        assert_eq!(a.degree, 2);
    }

    #[test]
    fn missing_airport_removed_with_its_routes() {
        let g = year_graph(&[("A", "B", 100.0), ("B", "X", 50.0), ("X", "A", 10.0)]);
        let table = gps(vec![
            AirportRecord::us("A", "Alpha", 40.0, -100.0),
            AirportRecord::us("B", "Bravo", 41.0, -95.0),
        ]);

        let net = clean(&g, &table);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
        assert!(net.airport("X").is_none());
        assert!(net.route("A", "B").is_some());
        assert!(net.route("B", "X").is_none());
    }

    #[test]
    fn out_of_box_airport_is_excluded() {
        let g = year_graph(&[("A", "N", 100.0), ("N", "B", 100.0), ("A", "B", 5.0)]);
        let table = gps(vec![
            AirportRecord::us("A", "Alpha", 40.0, -100.0),
            AirportRecord::us("B", "Bravo", 41.0, -95.0),
            AirportRecord::us("N", "North", 55.0, -100.0),
        ]);

        let net = clean(&g, &table);
        assert!(net.airport("N").is_none());
        assert_eq!(net.edge_count(), 1);
        assert!(net.route("A", "B").is_some());
    }

    #[test]
    fn degree_counts_only_surviving_routes() {
        // X has no coordinates, so A's route to X no longer counts.
        let g = year_graph(&[("A", "B", 1.0), ("B", "A", 1.0), ("A", "X", 1.0)]);
        let table = gps(vec![
            AirportRecord::us("A", "Alpha", 40.0, -100.0),
            AirportRecord::us("B", "Bravo", 41.0, -95.0),
        ]);

        let net = clean(&g, &table);
        for idx in net.graph.node_indices() {
            let airport = &net.graph[idx];
            let expected = net.graph.edges_directed(idx, Direction::Outgoing).count()
                + net.graph.edges_directed(idx, Direction::Incoming).count();
            assert_eq!(airport.degree, expected, "{}", airport.code);
        }
        assert_eq!(net.airport("A").expect("A").degree, 2);
    }

    #[test]
    fn duplicate_gps_code_uses_first_record() {
        let g = year_graph(&[("A", "B", 1.0)]);
        let table = gps(vec![
            AirportRecord::us("A", "First", 40.0, -100.0),
            AirportRecord::us("A", "Second", 30.0, -90.0),
            AirportRecord::us("B", "Bravo", 41.0, -95.0),
        ]);

        let net = clean(&g, &table);
        assert_eq!(net.airport("A").expect("A").city, "First");
    }

    #[test]
    fn node_order_is_preserved() {
        let g = year_graph(&[("C", "X", 1.0), ("B", "A", 1.0), ("A", "C", 1.0)]);
        let table = gps(vec![
            AirportRecord::us("A", "Alpha", 40.0, -100.0),
            AirportRecord::us("B", "Bravo", 41.0, -95.0),
            AirportRecord::us("C", "Charlie", 35.0, -90.0),
        ]);

        let net = clean(&g, &table);
        let codes: Vec<_> = net.graph.node_weights().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["C", "B", "A"]);
        assert_eq!(net.node_map.len(), 3);
    }

    #[test]
    fn empty_graph_stays_empty() {
        let g = year_graph(&[]);
        let net = clean(&g, &gps(vec![AirportRecord::us("A", "Alpha", 40.0, -100.0)]));
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
    }
}
