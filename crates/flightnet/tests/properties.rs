use proptest::prelude::*;

use flightnet::Dataset;
use flightnet::config::NetworkConfig;
use flightnet::load::{AirportRecord, PassengerRow};
use flightnet::metrics::betweenness::betweenness;
use flightnet::metrics::pagerank::pagerank;
use flightnet::projection::{node_ranking, top_k_nodes_by_centrality};

const CODES: [&str; 8] = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH"];

/// Routes between the first `n` codes; zero passengers are common on purpose.
fn arb_routes() -> impl Strategy<Value = Vec<(usize, usize, u32)>> {
    (2_usize..=CODES.len()).prop_flat_map(|n| {
        prop::collection::vec(
            (0..n, 0..n, prop_oneof![Just(0_u32), 1_u32..200_000]),
            1..24,
        )
    })
}

/// Like [`arb_routes`] but every route also gets a return leg, so the
/// network has cycles and the power iterations usually converge.
fn arb_round_trips() -> impl Strategy<Value = Vec<(usize, usize, u32)>> {
    arb_routes().prop_flat_map(|routes| {
        let n = routes.len();
        (Just(routes), prop::collection::vec(0_u32..200_000, n)).prop_map(|(routes, back)| {
            routes
                .iter()
                .zip(back)
                .flat_map(|(&(a, b, p), q)| [(a, b, p), (b, a, q)])
                .collect()
        })
    })
}

fn dataset(routes: &[(usize, usize, u32)]) -> Dataset {
    dataset_without_gps(routes, &[])
}

/// Dataset whose airport table has no entry for the codes at `missing`.
fn dataset_without_gps(routes: &[(usize, usize, u32)], missing: &[usize]) -> Dataset {
    let rows: Vec<PassengerRow> = routes
        .iter()
        .filter(|(a, b, _)| a != b)
        .map(|&(a, b, p)| PassengerRow::new(CODES[a], CODES[b], 2015, f64::from(p), "Carrier"))
        .collect();
    let airports = CODES
        .iter()
        .enumerate()
        .filter(|(i, _)| !missing.contains(i))
        .map(|(i, code)| {
            let (lat, long) = (25.0 + 2.0 * i as f64, -120.0 + 5.0 * i as f64);
            AirportRecord::us(code, &format!("{code} City"), lat, long)
        });
    Dataset::from_rows(rows, airports, NetworkConfig::default())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn weight_inv_follows_zero_guard(routes in arb_routes()) {
        let net = dataset(&routes).clean_year(2015);
        for route in net.graph.edge_weights() {
            if route.weight.abs() < f64::EPSILON {
                prop_assert!((route.weight_inv - 1.0).abs() < f64::EPSILON);
            } else {
                prop_assert!((route.weight_inv - 1.0 / route.weight).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn cleaning_induces_located_subgraph(
        routes in arb_routes(),
        missing in prop::collection::vec(0..CODES.len(), 0..4),
    ) {
        let net = dataset_without_gps(&routes, &missing).clean_year(2015);
        let missing_codes: Vec<&str> = missing.iter().map(|&i| CODES[i]).collect();

        for airport in net.graph.node_weights() {
            prop_assert!(!missing_codes.contains(&airport.code.as_str()));
        }
        for node in net.graph.node_indices() {
            let degree = net.graph.neighbors_undirected(node).count();
            prop_assert_eq!(net.graph[node].degree, degree);
        }

        let kept = routes
            .iter()
            .filter(|(a, b, _)| a != b && !missing.contains(a) && !missing.contains(b))
            .map(|&(a, b, _)| (a, b))
            .collect::<std::collections::HashSet<_>>()
            .len();
        prop_assert_eq!(net.edge_count(), kept);
    }

    #[test]
    fn pagerank_is_a_distribution(routes in arb_routes()) {
        let ds = dataset(&routes);
        let net = ds.clean_year(2015);
        let pr = pagerank(&net, &ds.config().pagerank);
        prop_assume!(pr.converged && net.node_count() > 0);
        let total: f64 = pr.scores.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-6);
        prop_assert!(pr.scores.values().all(|&s| s > 0.0));
    }

    #[test]
    fn betweenness_is_bounded(routes in arb_routes()) {
        let net = dataset(&routes).clean_year(2015);
        let bc = betweenness(&net);
        prop_assert_eq!(bc.nodes.len(), net.node_count());
        prop_assert_eq!(bc.edges.len(), net.edge_count());
        for &score in bc.nodes.values() {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&score));
        }
        for &score in bc.edges.values() {
            prop_assert!((0.0..=1.0 + 1e-9).contains(&score));
        }
    }

    #[test]
    fn annotated_network_invariants(routes in arb_round_trips()) {
        let result = dataset(&routes).build_year_network(2015);
        prop_assume!(result.is_ok());
        let net = result.expect("checked above");

        for edge in net.graph.edge_indices() {
            let (s, t) = net.graph.edge_endpoints(edge).expect("endpoints");
            let route = &net.graph[edge];
            prop_assert!((route.source_lat - net.graph[s].airport.latitude).abs() < f64::EPSILON);
            prop_assert!((route.target_long - net.graph[t].airport.longitude).abs() < f64::EPSILON);
        }

        let ranking = node_ranking(&net);
        let scores: Vec<f64> = ranking
            .iter()
            .map(|code| net.airport(code).expect("ranked").betweenness_centrality)
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]));

        let top = top_k_nodes_by_centrality(&net, 3);
        prop_assert_eq!(top.len(), net.node_count().min(3));
        prop_assert!(top.windows(2).all(|w| w[0].centrality >= w[1].centrality));
    }
}
