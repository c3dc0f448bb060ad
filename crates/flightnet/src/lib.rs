#![forbid(unsafe_code)]
//! flightnet library.
//!
//! Builds one directed route network per year from origin/destination
//! passenger records, drops airports without usable coordinates, scores
//! airports and routes with four centrality metrics, and projects the result
//! into ranked tables for a map or table renderer.
//!
//! # Pipeline
//!
//! ```text
//! passenger rows ──► load::passengers::RouteRecords ─┐
//!                                                    ├─► graph::build::extract_year ─► YearGraph
//! airport file ───► load::airports::GpsTable ────────┤
//!                                                    └─► graph::clean::clean ─────────► AirportNetwork
//!                                                          metrics::annotate ─────────► AnnotatedNetwork
//!                                                          projection::{prepare_view, top_tables}
//! ```
//!
//! [`pipeline::Dataset`] chains the stages for a single year.
//!
//! # Conventions
//!
//! - **Errors**: library error enums derive `thiserror::Error`
//!   ([`error::AnalysisError`], [`error::LoadError`]); config file loading
//!   returns `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod load;
pub mod metrics;
pub mod pipeline;
pub mod projection;

#[cfg(test)]
mod test_support;

pub use config::NetworkConfig;
pub use error::{AnalysisError, LoadError};
pub use graph::{AirportNetwork, YearGraph};
pub use metrics::annotate::{AnnotatedNetwork, annotate};
pub use pipeline::Dataset;
