pub mod analyze;
pub mod view;
pub mod years;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use flightnet::Dataset;
use flightnet::config::NetworkConfig;
use flightnet::error::AnalysisError;
use flightnet::load::{PassengerRow, parse_airport_table, parse_passenger_csv};
use tracing::info;

use crate::output::{CliError, OutputMode, render_error};

/// Default analysis year.
pub const DEFAULT_YEAR: i32 = 2015;

/// Parse a passenger CSV file.
pub fn read_passengers(path: &Path) -> anyhow::Result<Vec<PassengerRow>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_passenger_csv(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load both tables and apply the configured filters.
pub fn load_dataset(
    passengers: &Path,
    airports: &Path,
    config: NetworkConfig,
) -> anyhow::Result<Dataset> {
    let rows = read_passengers(passengers)?;

    let file =
        File::open(airports).with_context(|| format!("Failed to open {}", airports.display()))?;
    let gps = parse_airport_table(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", airports.display()))?;

    let dataset = Dataset::from_rows(rows, gps, config);
    info!(
        records = dataset.records().len(),
        airports = dataset.airports().len(),
        hash = dataset.records().content_hash(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Report a degenerate year on stderr and turn it into the command's error.
pub fn insufficient_network(output: OutputMode, year: i32, err: &AnalysisError) -> anyhow::Error {
    let message = format!("insufficient network for {year}: {err}");
    let cli_error = CliError::with_details(&message, err.hint(), "insufficient_network");
    if let Err(render_err) = render_error(output, &cli_error) {
        return render_err;
    }
    anyhow::anyhow!(message)
}
