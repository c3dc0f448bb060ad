//! Attach every centrality score to a new, annotated network.
//!
//! # Overview
//!
//! [`annotate`] runs PageRank, betweenness and eigenvector centrality on an
//! [`AirportNetwork`] and returns an [`AnnotatedNetwork`] with the same node
//! and edge order. The input network is not modified, so annotating twice
//! gives identical values.
//!
//! Once every node score is in place, each route is stamped with its
//! endpoints' coordinates so a map renderer can draw it without a node
//! lookup.
//!
//! # Failure
//!
//! Either the whole network is annotated or nothing is. A network with fewer
//! than two airports, or one on which PageRank or eigenvector iteration does
//! not converge, yields an [`AnalysisError`].

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::config::NetworkConfig;
use crate::error::{AnalysisError, Metric};
use crate::graph::build::Route;
use crate::graph::clean::{Airport, AirportNetwork};
use crate::metrics::betweenness::betweenness;
use crate::metrics::eigenvector::eigenvector_centrality;
use crate::metrics::pagerank::pagerank;

// ---------------------------------------------------------------------------
// Annotated types
// ---------------------------------------------------------------------------

/// An airport with its centrality scores.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAirport {
    pub airport: Airport,
    pub page_rank: f64,
    /// Normalized node betweenness under `weight_inv` costs.
    pub betweenness_centrality: f64,
    pub eigenvector_centrality: f64,
}

/// A route with its betweenness and endpoint coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRoute {
    pub route: Route,
    pub edge_betweenness_centrality: f64,
    pub source_lat: f64,
    pub source_long: f64,
    pub target_lat: f64,
    pub target_long: f64,
}

/// A cleaned network with every centrality attribute filled in.
#[derive(Debug, Clone)]
pub struct AnnotatedNetwork {
    pub year: i32,
    pub graph: DiGraph<RankedAirport, RankedRoute>,
    /// Mapping from airport code to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl AnnotatedNetwork {
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up an airport by code.
    #[must_use]
    pub fn airport(&self, code: &str) -> Option<&RankedAirport> {
        self.node_map
            .get(code)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Return the route from `origin` to `dest`, if present.
    #[must_use]
    pub fn route(&self, origin: &str, dest: &str) -> Option<&RankedRoute> {
        let a = *self.node_map.get(origin)?;
        let b = *self.node_map.get(dest)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge)
    }
}

// ---------------------------------------------------------------------------
// annotate
// ---------------------------------------------------------------------------

/// Compute all centrality metrics and return the annotated network.
///
/// # Errors
///
/// - [`AnalysisError::TooFewAirports`] if the network has fewer than two
///   airports.
/// - [`AnalysisError::NoConvergence`] if PageRank or eigenvector iteration
///   runs out of iterations.
#[instrument(skip(network, config), fields(year = network.year))]
pub fn annotate(
    network: &AirportNetwork,
    config: &NetworkConfig,
) -> Result<AnnotatedNetwork, AnalysisError> {
    let node_count = network.node_count();
    if node_count < 2 {
        return Err(AnalysisError::TooFewAirports { node_count });
    }

    let pr = pagerank(network, &config.pagerank);
    if !pr.converged {
        return Err(AnalysisError::NoConvergence {
            metric: Metric::PageRank,
            max_iter: config.pagerank.max_iter,
        });
    }

    let ev = eigenvector_centrality(network, &config.eigenvector);
    if !ev.converged {
        return Err(AnalysisError::NoConvergence {
            metric: Metric::Eigenvector,
            max_iter: config.eigenvector.max_iter,
        });
    }

    let bc = betweenness(network);

    let g = &network.graph;
    let mut graph = g.map(
        |_, airport| RankedAirport {
            airport: airport.clone(),
            page_rank: score(&pr.scores, &airport.code),
            betweenness_centrality: score(&bc.nodes, &airport.code),
            eigenvector_centrality: score(&ev.scores, &airport.code),
        },
        |edge, route| {
            let edge_betweenness_centrality = g
                .edge_endpoints(edge)
                .and_then(|(s, t)| bc.edges.get(&(g[s].code.clone(), g[t].code.clone())))
                .copied()
                .unwrap_or_default();
            RankedRoute {
                route: route.clone(),
                edge_betweenness_centrality,
                source_lat: 0.0,
                source_long: 0.0,
                target_lat: 0.0,
                target_long: 0.0,
            }
        },
    );

    propagate_coordinates(&mut graph);

    debug!(
        pagerank_iterations = pr.iterations,
        eigenvector_iterations = ev.iterations,
        "annotated network"
    );

    Ok(AnnotatedNetwork {
        year: network.year,
        graph,
        node_map: network.node_map.clone(),
    })
}

fn score(scores: &HashMap<String, f64>, code: &str) -> f64 {
    scores.get(code).copied().unwrap_or_default()
}

/// Copy endpoint coordinates onto every route.
fn propagate_coordinates(graph: &mut DiGraph<RankedAirport, RankedRoute>) {
    for edge in graph.edge_indices() {
        let Some((s, t)) = graph.edge_endpoints(edge) else {
            continue;
        };
        let (source_lat, source_long) = (graph[s].airport.latitude, graph[s].airport.longitude);
        let (target_lat, target_long) = (graph[t].airport.latitude, graph[t].airport.longitude);
        let route = &mut graph[edge];
        route.source_lat = source_lat;
        route.source_long = source_long;
        route.target_lat = target_lat;
        route.target_long = target_long;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
