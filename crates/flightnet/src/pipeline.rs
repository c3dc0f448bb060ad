//! Per-year analysis over a loaded dataset.
//!
//! A [`Dataset`] holds the immutable multi-year route records, the filtered
//! GPS table and the configuration. Each call to
//! [`Dataset::build_year_network`] builds its own graph, so independent
//! years can be analysed from a shared `&Dataset`.

use tracing::{info, instrument};

use crate::config::NetworkConfig;
use crate::error::AnalysisError;
use crate::graph::{AirportNetwork, clean, extract_year};
use crate::load::{AirportRecord, GpsTable, PassengerRow, RouteRecords};
use crate::metrics::annotate::{AnnotatedNetwork, annotate};

/// Loaded route and airport data plus the settings used to analyse it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: RouteRecords,
    airports: GpsTable,
    config: NetworkConfig,
}

impl Dataset {
    /// Wrap already-loaded tables.
    #[must_use]
    pub const fn new(records: RouteRecords, airports: GpsTable, config: NetworkConfig) -> Self {
        Self {
            records,
            airports,
            config,
        }
    }

    /// Build both tables from parsed rows, applying the configured code
    /// exclusions, country filter and bounding box.
    #[must_use]
    pub fn from_rows(
        rows: impl IntoIterator<Item = PassengerRow>,
        airports: impl IntoIterator<Item = AirportRecord>,
        config: NetworkConfig,
    ) -> Self {
        let records = RouteRecords::from_rows(rows, &config.excluded_codes);
        let airports = GpsTable::from_records(airports, &config.country, &config.bounds);
        Self::new(records, airports, config)
    }

    #[must_use]
    pub const fn records(&self) -> &RouteRecords {
        &self.records
    }

    #[must_use]
    pub const fn airports(&self) -> &GpsTable {
        &self.airports
    }

    #[must_use]
    pub const fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Extract and geo-clean the network for `year` without scoring it.
    #[must_use]
    pub fn clean_year(&self, year: i32) -> AirportNetwork {
        clean(&extract_year(&self.records, year), &self.airports)
    }

    /// Build, clean and annotate the network for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the cleaned network has fewer than two
    /// airports (including years with no records) or if an iterative metric
    /// does not converge.
    #[instrument(skip(self))]
    pub fn build_year_network(&self, year: i32) -> Result<AnnotatedNetwork, AnalysisError> {
        let network = self.clean_year(year);
        let annotated = annotate(&network, &self.config)?;
        info!(
            airports = annotated.node_count(),
            routes = annotated.edge_count(),
            "built year network"
        );
        Ok(annotated)
    }
}
