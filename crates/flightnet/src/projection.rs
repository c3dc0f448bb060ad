//! Ranked and trimmed views of an annotated network.
//!
//! Everything here is a pure read of an [`AnnotatedNetwork`]. Sorts are
//! stable, so ties keep graph order (first-seen route order), and every row
//! type serializes to flat JSON for a renderer.

use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::metrics::annotate::AnnotatedNetwork;

/// One route as a flat table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRow {
    pub origin: String,
    pub destination: String,
    pub weight: f64,
    pub weight_inv: f64,
    pub airlines: String,
    pub edge_betweenness_centrality: f64,
    pub source_lat: f64,
    pub source_long: f64,
    pub target_lat: f64,
    pub target_long: f64,
}

/// Airport row of the top-centrality table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportCentralityRow {
    pub code: String,
    pub city: String,
    /// Node betweenness rounded to 2 decimals.
    pub centrality: f64,
}

/// Route row of the top-centrality table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCentralityRow {
    pub origin: String,
    pub destination: String,
    /// Route betweenness rounded to 4 decimals.
    pub centrality: f64,
}

/// Airport codes sorted ascending by betweenness.
///
/// Renderers draw in this order so the most central airports end up on top.
#[must_use]
pub fn node_ranking(network: &AnnotatedNetwork) -> Vec<String> {
    let mut nodes: Vec<_> = network.graph.node_weights().collect();
    nodes.sort_by(|a, b| a.betweenness_centrality.total_cmp(&b.betweenness_centrality));
    nodes.into_iter().map(|n| n.airport.code.clone()).collect()
}

/// The `k` heaviest routes by passenger count.
#[must_use]
pub fn edge_table_trimmed(network: &AnnotatedNetwork, k: usize) -> Vec<RouteRow> {
    let g = &network.graph;
    let mut rows: Vec<RouteRow> = g
        .edge_references()
        .map(|e| {
            let r = e.weight();
            RouteRow {
                origin: g[e.source()].airport.code.clone(),
                destination: g[e.target()].airport.code.clone(),
                weight: r.route.weight,
                weight_inv: r.route.weight_inv,
                airlines: r.route.airlines.clone(),
                edge_betweenness_centrality: r.edge_betweenness_centrality,
                source_lat: r.source_lat,
                source_long: r.source_long,
                target_lat: r.target_lat,
                target_long: r.target_long,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    rows.truncate(k);
    rows
}

/// The `k` airports with the highest betweenness.
#[must_use]
pub fn top_k_nodes_by_centrality(
    network: &AnnotatedNetwork,
    k: usize,
) -> Vec<AirportCentralityRow> {
    let mut nodes: Vec<_> = network.graph.node_weights().collect();
    nodes.sort_by(|a, b| b.betweenness_centrality.total_cmp(&a.betweenness_centrality));
    nodes
        .into_iter()
        .take(k)
        .map(|n| AirportCentralityRow {
            code: n.airport.code.clone(),
            city: n.airport.city.clone(),
            centrality: round_to(n.betweenness_centrality, 2),
        })
        .collect()
}

/// The `k` routes with the highest route betweenness.
#[must_use]
pub fn top_k_edges_by_edge_centrality(
    network: &AnnotatedNetwork,
    k: usize,
) -> Vec<RouteCentralityRow> {
    let g = &network.graph;
    let mut edges: Vec<_> = g.edge_references().collect();
    edges.sort_by(|a, b| {
        b.weight()
            .edge_betweenness_centrality
            .total_cmp(&a.weight().edge_betweenness_centrality)
    });
    edges
        .into_iter()
        .take(k)
        .map(|e| RouteCentralityRow {
            origin: g[e.source()].airport.code.clone(),
            destination: g[e.target()].airport.code.clone(),
            centrality: round_to(e.weight().edge_betweenness_centrality, 4),
        })
        .collect()
}

/// Trimmed route table plus node drawing order, for a map view.
#[must_use]
pub fn prepare_view(network: &AnnotatedNetwork, k: usize) -> (Vec<RouteRow>, Vec<String>) {
    (edge_table_trimmed(network, k), node_ranking(network))
}

/// Top-`k` airport and route centrality tables.
#[must_use]
pub fn top_tables(
    network: &AnnotatedNetwork,
    k: usize,
) -> (Vec<AirportCentralityRow>, Vec<RouteCentralityRow>) {
    (
        top_k_nodes_by_centrality(network, k),
        top_k_edges_by_edge_centrality(network, k),
    )
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
