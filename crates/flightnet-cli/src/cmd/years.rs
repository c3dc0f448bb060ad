//! `flightnet years`: distinct years in a passenger table.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use flightnet::config::NetworkConfig;
use flightnet::load::RouteRecords;
use serde::Serialize;

use crate::cmd::read_passengers;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `flightnet years`.
#[derive(Args, Debug)]
pub struct YearsArgs {
    /// Passenger table CSV.
    #[arg(long)]
    pub passengers: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct YearsReport {
    pub years: Vec<i32>,
    pub records: usize,
    pub dataset_hash: String,
}

/// Execute `flightnet years`.
///
/// Applies the configured code exclusions, so the listed years and the hash
/// match what `analyze` and `view` see.
pub fn run_years(
    args: &YearsArgs,
    config: &NetworkConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let rows = read_passengers(&args.passengers)?;
    let records = RouteRecords::from_rows(rows, &config.excluded_codes);

    let report = YearsReport {
        years: records.years().into_iter().collect(),
        records: records.len(),
        dataset_hash: records.content_hash().to_string(),
    };

    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &YearsReport, w: &mut dyn Write) -> io::Result<()> {
    for year in &report.years {
        writeln!(w, "{year}")?;
    }
    Ok(())
}

fn render_pretty(report: &YearsReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Years")?;
    pretty_kv(w, "Records", report.records.to_string())?;
    pretty_kv(w, "Dataset", &report.dataset_hash)?;
    writeln!(w)?;
    for year in &report.years {
        writeln!(w, "{year}")?;
    }
    Ok(())
}
