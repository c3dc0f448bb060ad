//! Weighted PageRank over the route network.
//!
//! # Overview
//!
//! A random traveller at airport `u` takes route `u → v` with probability
//! proportional to the route's affinity (its passenger count, or 1 for a
//! zero-passenger route). With probability `1 - d` they teleport to a
//! uniformly random airport instead.
//!
//! # Algorithm
//!
//! Power iteration on the row-normalized affinity matrix:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) * a(u,v) / Σ_w a(u,w)   for each u → v
//!       + d * Σ PR(z) / N                                    for each dangling z
//! ```
//!
//! Airports with no outgoing routes are dangling; their rank is spread
//! evenly over every airport. Iteration stops when the L1 change is below
//! `N * tolerance`.
//!
//! # Output
//!
//! Returns a [`PageRankResult`] with per-airport scores summing to 1 and
//! metadata about the computation.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::graph::clean::AirportNetwork;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a route vs teleporting).
    /// Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Per-node convergence threshold. Iteration stops when the L1 norm of
    /// the rank delta is below `N * tolerance`.
    /// Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// PageRank scores: airport code → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute affinity-weighted PageRank for every airport.
///
/// Scores are returned even when iteration did not converge; callers check
/// [`PageRankResult::converged`].
#[must_use]
#[instrument(skip(network, config), fields(year = network.year))]
pub fn pagerank(network: &AirportNetwork, config: &PageRankConfig) -> PageRankResult {
    let g = &network.graph;
    let n = g.node_count();

    if n == 0 {
        return PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let base = (1.0 - config.damping) / n_f64;

    // Row-normalized transition lists; empty for dangling airports.
    let transitions: Vec<Vec<(usize, f64)>> = g
        .node_indices()
        .map(|u| {
            let total: f64 = g.edges(u).map(|e| e.weight().affinity()).sum();
            g.edges(u)
                .map(|e| (e.target().index(), e.weight().affinity() / total))
                .collect()
        })
        .collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling_sum: f64 = transitions
            .iter()
            .zip(&ranks)
            .filter(|(out, _)| out.is_empty())
            .map(|(_, r)| r)
            .sum();
        let teleport = base + config.damping * dangling_sum / n_f64;

        for r in &mut new_ranks {
            *r = teleport;
        }

        for (u, out) in transitions.iter().enumerate() {
            let share = config.damping * ranks[u];
            for &(v, p) in out {
                new_ranks[v] += share * p;
            }
        }

        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, "PageRank converged");
    } else {
        warn!(max_iter = config.max_iter, "PageRank did not converge");
    }

    let scores = g
        .node_indices()
        .map(|idx| (g[idx].code.clone(), ranks[idx.index()]))
        .collect();

    PageRankResult {
        scores,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
