//! `flightnet view`: heaviest routes with endpoint coordinates, plus the
//! airport drawing order.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flightnet::config::NetworkConfig;
use flightnet::projection::{RouteRow, prepare_view};
use serde::Serialize;

use crate::cmd::{DEFAULT_YEAR, insufficient_network, load_dataset};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `flightnet view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Passenger table CSV.
    #[arg(long)]
    pub passengers: PathBuf,

    /// Colon-delimited airport database.
    #[arg(long)]
    pub airports: PathBuf,

    /// Year to draw.
    #[arg(long, default_value_t = DEFAULT_YEAR)]
    pub year: i32,

    /// Keep only this many of the heaviest routes (default: config `edge_trim`).
    #[arg(long)]
    pub trim: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ViewReport {
    pub year: i32,
    pub routes: Vec<RouteRow>,
    /// Airport codes by ascending betweenness; the most central draw last.
    pub ranking: Vec<String>,
}

/// Execute `flightnet view`.
pub fn run_view(args: &ViewArgs, config: NetworkConfig, output: OutputMode) -> anyhow::Result<()> {
    let trim = args.trim.unwrap_or(config.edge_trim);
    let dataset = load_dataset(&args.passengers, &args.airports, config)?;

    let annotated = dataset
        .build_year_network(args.year)
        .map_err(|err| insufficient_network(output, args.year, &err))?;

    let (routes, ranking) = prepare_view(&annotated, trim);
    let report = ViewReport {
        year: args.year,
        routes,
        ranking,
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &ViewReport, w: &mut dyn Write) -> io::Result<()> {
    for r in &report.routes {
        writeln!(
            w,
            "route\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.origin,
            r.destination,
            r.weight,
            r.edge_betweenness_centrality,
            r.source_lat,
            r.source_long,
            r.target_lat,
            r.target_long,
            r.airlines
        )?;
    }
    for code in &report.ranking {
        writeln!(w, "airport\t{code}")?;
    }
    Ok(())
}

fn render_pretty(report: &ViewReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Heaviest routes {}", report.year))?;
    pretty_kv(w, "Routes", report.routes.len().to_string())?;
    pretty_kv(w, "Airports", report.ranking.len().to_string())?;
    writeln!(w)?;

    for r in &report.routes {
        writeln!(
            w,
            "{:<5} → {:<5} {:>12.0}  ({:>7.3}, {:>8.3}) → ({:>7.3}, {:>8.3})  {:.4}",
            r.origin,
            r.destination,
            r.weight,
            r.source_lat,
            r.source_long,
            r.target_lat,
            r.target_long,
            r.edge_betweenness_centrality
        )?;
    }
    writeln!(w)?;

    pretty_section(w, "Drawing order (least central first)")?;
    writeln!(w, "{}", report.ranking.join(" "))?;
    Ok(())
}
