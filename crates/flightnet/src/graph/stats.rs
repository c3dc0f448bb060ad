//! Summary statistics for a cleaned route network.
//!
//! # Statistics Provided
//!
//! - **airport_count** / **route_count**: node and edge counts.
//! - **total_passengers**: sum of route weights.
//! - **density**: `route_count / (airport_count * (airport_count - 1))`.
//!   Zero for networks with fewer than two airports.
//! - **weakly_connected_component_count**: disjoint sub-networks when route
//!   direction is ignored. More than one usually means an island market
//!   that will slow eigenvector convergence.
//! - **zero_passenger_route_count**: routes whose cost was zero-guarded.
//! - **max_degree**: the busiest airport's in + out degree.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::clean::AirportNetwork;

/// Summary statistics for an [`AirportNetwork`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub year: i32,
    pub airport_count: usize,
    pub route_count: usize,
    pub total_passengers: f64,
    pub density: f64,
    pub weakly_connected_component_count: usize,
    pub zero_passenger_route_count: usize,
    pub max_degree: usize,
}

impl NetworkStats {
    /// Compute statistics from a cleaned network.
    #[must_use]
    pub fn from_network(network: &AirportNetwork) -> Self {
        let airport_count = network.node_count();
        let route_count = network.edge_count();

        let total_passengers = network.graph.edge_weights().map(|r| r.weight).sum();
        let zero_passenger_route_count = network
            .graph
            .edge_weights()
            .filter(|r| r.weight <= 0.0)
            .count();
        let max_degree = network
            .graph
            .node_weights()
            .map(|a| a.degree)
            .max()
            .unwrap_or(0);

        Self {
            year: network.year,
            airport_count,
            route_count,
            total_passengers,
            density: compute_density(airport_count, route_count),
            weakly_connected_component_count: connected_components(&network.graph),
            zero_passenger_route_count,
            max_degree,
        }
    }
}

fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoundingBox;
    use crate::graph::{build::extract_year, clean::clean};
    use crate::load::airports::{AirportRecord, GpsTable};
    use crate::load::passengers::{PassengerRow, RouteRecords};

    fn network(rows: &[(&str, &str, f64)]) -> AirportNetwork {
        let rows = rows
            .iter()
            .map(|(a, b, p)| PassengerRow::new(a, b, 2015, *p, "Carrier"));
        let records = RouteRecords::from_rows(rows, &[]);
        let table = GpsTable::from_records(
            ["A", "B", "C", "D"]
                .iter()
                .enumerate()
                .map(|(i, code)| AirportRecord::us(code, code, 30.0 + i as f64, -90.0)),
            "USA",
            &BoundingBox::default(),
        );
        clean(&extract_year(&records, 2015), &table)
    }

    #[test]
    fn empty_network_stats() {
        let stats = NetworkStats::from_network(&network(&[]));
        assert_eq!(stats.airport_count, 0);
        assert_eq!(stats.route_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert_eq!(stats.weakly_connected_component_count, 0);
        assert_eq!(stats.max_degree, 0);
    }

    #[test]
    fn two_islands_counted() {
        let stats = NetworkStats::from_network(&network(&[
            ("A", "B", 10.0),
            ("B", "A", 20.0),
            ("C", "D", 0.0),
        ]));
        assert_eq!(stats.airport_count, 4);
        assert_eq!(stats.route_count, 3);
        assert!((stats.total_passengers - 30.0).abs() < f64::EPSILON);
        assert!((stats.density - 3.0 / 12.0).abs() < 1e-12);
        assert_eq!(stats.weakly_connected_component_count, 2);
        assert_eq!(stats.zero_passenger_route_count, 1);
        assert_eq!(stats.max_degree, 2);
    }
}
