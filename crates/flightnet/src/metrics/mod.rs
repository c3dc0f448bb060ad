//! Centrality metrics for a cleaned route network.
//!
//! # Overview
//!
//! Each metric operates on an [`AirportNetwork`](crate::graph::AirportNetwork)
//! and answers a different question about the airports and routes in it:
//!
//! - **PageRank** (`pagerank`): Where does a random traveller end up if they
//!   pick each next leg in proportion to its passenger volume?
//! - **Betweenness centrality** (`betweenness`): Which airports and routes
//!   sit on the cheapest connections between other airports? Route cost is
//!   `weight_inv`, so busy routes are short.
//! - **Eigenvector centrality** (`eigenvector`): Which airports are strongly
//!   connected to other strongly connected airports?
//!
//! [`annotate`](annotate::annotate) runs all of them and attaches the scores
//! to a new [`AnnotatedNetwork`](annotate::AnnotatedNetwork).
//!
//! # Usage
//!
//! ```rust,ignore
//! use flightnet::metrics::{betweenness::betweenness, eigenvector::eigenvector_centrality,
//!     pagerank::pagerank};
//!
//! let pr = pagerank(&network, &config.pagerank);
//! let bc = betweenness(&network);
//! let ev = eigenvector_centrality(&network, &config.eigenvector);
//! ```

pub mod annotate;
pub mod betweenness;
pub mod eigenvector;
pub mod pagerank;
