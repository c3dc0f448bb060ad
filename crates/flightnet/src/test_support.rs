//! Shared fixtures for unit tests.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::DiGraph;

use crate::graph::build::Route;
use crate::graph::clean::{Airport, AirportNetwork};

/// Build an [`AirportNetwork`] from `(origin, dest, passengers)` triples.
///
/// Airports are added in sorted code order and placed on a diagonal so each
/// has distinct coordinates. Degrees are computed like the cleaner does.
pub fn make_network(routes: &[(&str, &str, f64)]) -> AirportNetwork {
    let codes: BTreeSet<&str> = routes.iter().flat_map(|(a, b, _)| [*a, *b]).collect();
    make_network_nodes(&codes.into_iter().collect::<Vec<_>>(), routes)
}

/// Like [`make_network`] but with an explicit node list, so isolated
/// airports can be included.
pub fn make_network_nodes(codes: &[&str], routes: &[(&str, &str, f64)]) -> AirportNetwork {
    let mut graph = DiGraph::<Airport, Route>::new();
    let mut node_map = HashMap::new();

    for (i, code) in codes.iter().enumerate() {
        let idx = graph.add_node(Airport {
            code: (*code).to_string(),
            city: format!("{code} City"),
            latitude: 30.0 + i as f64,
            longitude: -120.0 + i as f64,
            degree: 0,
        });
        node_map.insert((*code).to_string(), idx);
    }

    for (a, b, passengers) in routes {
        graph.add_edge(node_map[*a], node_map[*b], Route::new(*passengers, "Test Air"));
    }

    for idx in graph.node_indices() {
        graph[idx].degree = graph.neighbors_undirected(idx).count();
    }

    AirportNetwork {
        year: 2015,
        graph,
        node_map,
    }
}
