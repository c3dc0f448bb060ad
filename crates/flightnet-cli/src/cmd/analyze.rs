//! `flightnet analyze`: network summary and top-centrality tables.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flightnet::annotate;
use flightnet::config::NetworkConfig;
use flightnet::graph::NetworkStats;
use flightnet::projection::{AirportCentralityRow, RouteCentralityRow, top_tables};
use serde::Serialize;

use crate::cmd::{DEFAULT_YEAR, insufficient_network, load_dataset};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `flightnet analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Passenger table (CSV with ORIGIN, DEST, YEAR, PASSENGERS,
    /// UNIQUE_CARRIER_NAME columns).
    #[arg(long)]
    pub passengers: PathBuf,

    /// Colon-delimited airport database.
    #[arg(long)]
    pub airports: PathBuf,

    /// Year to analyze.
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Rows in each top-centrality table (default: config `top_k`).
    #[arg(long)]
    pub top: Option<usize>,
}

/// Report payload for `flightnet analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeReport {
    pub year: i32,
    pub dataset_hash: String,
    pub stats: NetworkStats,
    pub top_airports: Vec<AirportCentralityRow>,
    pub top_routes: Vec<RouteCentralityRow>,
}

/// Execute `flightnet analyze`.
pub fn run_analyze(
    args: &AnalyzeArgs,
    config: NetworkConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let top = args.top.unwrap_or(config.top_k);
    let dataset = load_dataset(&args.passengers, &args.airports, config)?;

    let network = dataset.clean_year(args.year);
    let stats = NetworkStats::from_network(&network);
    let annotated = annotate(&network, dataset.config())
        .map_err(|err| insufficient_network(output, args.year, &err))?;

    let (top_airports, top_routes) = top_tables(&annotated, top);
    let report = AnalyzeReport {
        year: args.year,
        dataset_hash: dataset.records().content_hash().to_string(),
        stats,
        top_airports,
        top_routes,
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &report.stats;
    writeln!(w, "year\t{}", report.year)?;
    writeln!(w, "airports\t{}", s.airport_count)?;
    writeln!(w, "routes\t{}", s.route_count)?;
    writeln!(w, "passengers\t{}", s.total_passengers)?;
    writeln!(w, "density\t{}", s.density)?;
    writeln!(w, "components\t{}", s.weakly_connected_component_count)?;
    writeln!(w, "hash\t{}", report.dataset_hash)?;
    for row in &report.top_airports {
        writeln!(w, "airport\t{}\t{}\t{}", row.code, row.city, row.centrality)?;
    }
    for row in &report.top_routes {
        writeln!(w, "route\t{}\t{}\t{}", row.origin, row.destination, row.centrality)?;
    }
    Ok(())
}

fn render_pretty(report: &AnalyzeReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &report.stats;
    pretty_section(w, &format!("Route network {}", report.year))?;
    pretty_kv(w, "Airports", s.airport_count.to_string())?;
    pretty_kv(w, "Routes", s.route_count.to_string())?;
    pretty_kv(w, "Passengers", format!("{:.0}", s.total_passengers))?;
    pretty_kv(w, "Density", format!("{:.4}", s.density))?;
    pretty_kv(w, "Components", s.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "Max degree", s.max_degree.to_string())?;
    pretty_kv(w, "Dataset", &report.dataset_hash)?;
    writeln!(w)?;

    pretty_section(w, "Most central airports")?;
    for (rank, row) in report.top_airports.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {:<5} {:<28} {:>6.2}",
            rank + 1,
            row.code,
            row.city,
            row.centrality
        )?;
    }
    writeln!(w)?;

    pretty_section(w, "Most central routes")?;
    for (rank, row) in report.top_routes.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {:<5} → {:<5} {:>8.4}",
            rank + 1,
            row.origin,
            row.destination,
            row.centrality
        )?;
    }
    Ok(())
}
