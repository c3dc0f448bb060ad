//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! An airport is central when central airports send passengers into it.
//! Scores are the dominant eigenvector of the route affinity matrix, where
//! `A[u][v]` is the affinity of `u → v` divided by the largest affinity in
//! the network (so the matrix entries lie in `(0, 1]`).
//!
//! # Algorithm
//!
//! Power iteration on `A + I`:
//!
//! 1. Start from the uniform vector summing to 1.
//! 2. `x' = x + Σ x[u] * A[u][v]` for each route `u → v`.
//! 3. Normalize `x'` to unit L2 norm.
//! 4. Stop when the L1 change is below `N * tolerance`.
//!
//! The identity shift keeps bipartite and periodic networks from
//! oscillating. A network whose routes all point one way (no cycles) has no
//! dominant eigenvector and runs out of iterations; the caller treats that
//! as fatal.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::graph::build::Route;
use crate::graph::clean::AirportNetwork;

/// Configuration for eigenvector centrality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    /// Per-node convergence threshold. Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of iterations. Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: airport code → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute eigenvector centrality for every airport in the network.
#[must_use]
#[instrument(skip(network, config), fields(year = network.year))]
pub fn eigenvector_centrality(
    network: &AirportNetwork,
    config: &EigenvectorConfig,
) -> EigenvectorResult {
    let g = &network.graph;
    let n = g.node_count();

    if n == 0 {
        return EigenvectorResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let max_affinity = g
        .edge_weights()
        .map(Route::affinity)
        .fold(0.0_f64, f64::max);
    let scale = if max_affinity > 0.0 { max_affinity } else { 1.0 };

    let routes: Vec<(usize, usize, f64)> = g
        .edge_references()
        .map(|e| {
            (
                e.source().index(),
                e.target().index(),
                e.weight().affinity() / scale,
            )
        })
        .collect();

    let n_f64 = n as f64;
    let mut scores = vec![1.0 / n_f64; n];

    let mut converged = false;
    let mut iterations = 0;

    for _ in 0..config.max_iter {
        iterations += 1;

        // Start from the previous vector: the identity term of A + I.
        let mut next = scores.clone();
        for &(u, v, w) in &routes {
            next[v] += scores[u] * w;
        }

        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        for x in &mut next {
            *x /= norm;
        }

        let diff: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        scores = next;

        if diff < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, "eigenvector centrality converged");
    } else {
        warn!(
            max_iter = config.max_iter,
            "eigenvector centrality did not converge"
        );
    }

    let scores = g
        .node_indices()
        .map(|idx| (g[idx].code.clone(), scores[idx.index()]))
        .collect();

    EigenvectorResult {
        scores,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
