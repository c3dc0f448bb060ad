//! Weighted node and route betweenness via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often an airport (or a route) lies on the
//! cheapest itineraries between other pairs of airports. Route cost is
//! `weight_inv`, so an itinerary over busy routes is short and one over thin
//! routes is long. A high-betweenness airport is a connecting hub.
//!
//! # Algorithm
//!
//! Brandes (2001) with Dijkstra in place of BFS:
//!
//! 1. For each source `s`, run Dijkstra to get shortest-path distances,
//!    path counts `sigma` and predecessor lists.
//! 2. Pop nodes in reverse settle order and push each node's dependency
//!    back to its predecessors. The share credited to route `v → w` is
//!    `sigma[v] / sigma[w] * (1 + delta[w])`.
//! 3. Sum dependencies over all sources.
//!
//! Node and route scores come out of the same sweep. Two paths tie only
//! when their summed costs are exactly equal.
//!
//! # Normalization
//!
//! - Node scores are multiplied by `1 / ((n-1)(n-2))` when `n > 2`.
//! - Route scores are multiplied by `1 / (n(n-1))` when `n > 1`.
//!
//! Complexity: O(V * E log V).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::graph::clean::AirportNetwork;

/// Normalized betweenness scores for one network.
#[derive(Debug, Clone, Default)]
pub struct BetweennessResult {
    /// Airport code → node betweenness.
    pub nodes: HashMap<String, f64>,
    /// `(origin, destination)` → route betweenness.
    pub edges: HashMap<(String, String), f64>,
}

/// Min-heap entry. `seq` breaks distance ties in push order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    dist: f64,
    seq: usize,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Compute normalized node and route betweenness for every airport and
/// route in the network.
///
/// Unreachable pairs contribute nothing. An isolated airport scores 0.
#[must_use]
#[allow(clippy::float_cmp)] // ties are exact by definition
#[instrument(skip(network), fields(year = network.year))]
pub fn betweenness(network: &AirportNetwork) -> BetweennessResult {
    let g = &network.graph;
    let n = g.node_count();

    if n == 0 {
        return BetweennessResult::default();
    }

    // Adjacency as (target, edge index, cost).
    let adjacency: Vec<Vec<(usize, usize, f64)>> = g
        .node_indices()
        .map(|u| {
            g.edges(u)
                .map(|e| (e.target().index(), e.id().index(), e.weight().weight_inv))
                .collect()
        })
        .collect();

    let mut node_cb = vec![0.0_f64; n];
    let mut edge_cb = vec![0.0_f64; g.edge_count()];

    for s in 0..n {
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        // (predecessor, edge index) pairs on shortest paths into each node.
        let mut predecessors: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0_f64; n];
        let mut seen: Vec<Option<f64>> = vec![None; n];
        let mut settled = vec![false; n];

        sigma[s] = 1.0;
        seen[s] = Some(0.0);

        let mut seq = 0_usize;
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            dist: 0.0,
            seq,
            node: s,
        });

        while let Some(QueueEntry { dist, node: v, .. }) = queue.pop() {
            if settled[v] {
                continue;
            }
            settled[v] = true;
            stack.push(v);

            for &(w, edge, cost) in &adjacency[v] {
                let vw_dist = dist + cost;
                if settled[w] {
                    continue;
                }
                match seen[w] {
                    Some(best) if vw_dist > best => {}
                    Some(best) if vw_dist == best => {
                        sigma[w] += sigma[v];
                        predecessors[w].push((v, edge));
                    }
                    _ => {
                        seen[w] = Some(vw_dist);
                        sigma[w] = sigma[v];
                        predecessors[w].clear();
                        predecessors[w].push((v, edge));
                        seq += 1;
                        queue.push(QueueEntry {
                            dist: vw_dist,
                            seq,
                            node: w,
                        });
                    }
                }
            }
        }

        // Accumulate dependencies, farthest nodes first.
        let mut delta = vec![0.0_f64; n];
        while let Some(w) = stack.pop() {
            let coeff = (1.0 + delta[w]) / sigma[w];
            for &(v, edge) in &predecessors[w] {
                let c = sigma[v] * coeff;
                edge_cb[edge] += c;
                delta[v] += c;
            }
            if w != s {
                node_cb[w] += delta[w];
            }
        }
    }

    let n_f64 = n as f64;
    if n > 2 {
        let scale = 1.0 / ((n_f64 - 1.0) * (n_f64 - 2.0));
        for v in &mut node_cb {
            *v *= scale;
        }
    }
    if n > 1 {
        let scale = 1.0 / (n_f64 * (n_f64 - 1.0));
        for v in &mut edge_cb {
            *v *= scale;
        }
    }

    let nodes: HashMap<String, f64> = g
        .node_indices()
        .map(|idx| (g[idx].code.clone(), node_cb[idx.index()]))
        .collect();

    let edges: HashMap<(String, String), f64> = g
        .edge_references()
        .map(|e| {
            (
                (g[e.source()].code.clone(), g[e.target()].code.clone()),
                edge_cb[e.id().index()],
            )
        })
        .collect();

    debug!(airports = n, routes = edges.len(), "computed betweenness");

    BetweennessResult { nodes, edges }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
