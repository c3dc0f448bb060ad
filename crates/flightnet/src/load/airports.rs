//! Airport coordinates from the global airport database.
//!
//! # Format
//!
//! One airport per line, 16 colon-separated fields, no header:
//!
//! ```text
//! CODE4:CODE3:CITY:PROVINCE:COUNTRY:<9 unused fields>:LATITUDE:LONGITUDE
//! KJFK:JFK:JOHN F KENNEDY INTERNATIONAL:NEW YORK:USA:040:038:023:N:073:046:044:W:00004:40.640:-73.779
//! ```
//!
//! The nine middle fields (degree/minute/second coordinates and altitude)
//! are not used; the decimal `LATITUDE`/`LONGITUDE` pair is authoritative.
//!
//! [`GpsTable`] keeps only records from the configured country whose
//! coordinates fall strictly inside the continental bounding box, sorted by
//! `CODE3`. Duplicate codes survive here; the graph cleaner keeps the first.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use tracing::{debug, instrument};

use crate::config::BoundingBox;
use crate::error::LoadError;

const FIELD_COUNT: usize = 16;
const IDX_CODE4: usize = 0;
const IDX_CODE3: usize = 1;
const IDX_CITY: usize = 2;
const IDX_PROVINCE: usize = 3;
const IDX_COUNTRY: usize = 4;
const IDX_LATITUDE: usize = 14;
const IDX_LONGITUDE: usize = 15;

/// One airport row with the unused placeholder fields dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    pub code4: String,
    pub code3: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl AirportRecord {
    /// Convenience constructor for fixtures: a US airport with the given
    /// code, city, and coordinates.
    #[must_use]
    pub fn us(code3: &str, city: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            code4: format!("K{code3}"),
            code3: code3.to_string(),
            city: city.to_string(),
            province: String::new(),
            country: "USA".to_string(),
            latitude,
            longitude,
        }
    }
}

/// Parse one colon-delimited airport line. `line_no` is 1-based and only
/// used for error reporting.
///
/// # Errors
///
/// Returns [`LoadError::FieldCount`] for a line with fewer than 16 fields
/// and [`LoadError::InvalidValue`] for a non-numeric latitude or longitude.
pub fn parse_airport_line(line: &str, line_no: usize) -> Result<AirportRecord, LoadError> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() < FIELD_COUNT {
        return Err(LoadError::FieldCount {
            line: line_no,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let coordinate = |idx: usize, field: &'static str| {
        let raw = fields[idx].trim();
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LoadError::InvalidValue {
                line: line_no,
                field,
                value: raw.to_string(),
            })
    };

    Ok(AirportRecord {
        code4: fields[IDX_CODE4].trim().to_string(),
        code3: fields[IDX_CODE3].trim().to_string(),
        city: fields[IDX_CITY].trim().to_string(),
        province: fields[IDX_PROVINCE].trim().to_string(),
        country: fields[IDX_COUNTRY].trim().to_string(),
        latitude: coordinate(IDX_LATITUDE, "LATITUDE")?,
        longitude: coordinate(IDX_LONGITUDE, "LONGITUDE")?,
    })
}

/// Parse a whole airport file.
///
/// Blank lines are skipped, as are rows without a usable three-letter code
/// (`N/A` or empty), since they can never match a route endpoint.
///
/// # Errors
///
/// Propagates the first [`parse_airport_line`] error or read failure.
pub fn parse_airport_table<R: BufRead>(reader: R) -> Result<Vec<AirportRecord>, LoadError> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Io {
            line: line_no,
            source,
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_airport_line(line, line_no)?;
        if record.code3.is_empty() || record.code3 == "N/A" {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Continental airport table, sorted by `CODE3`.
#[derive(Debug, Clone, Default)]
pub struct GpsTable {
    records: Vec<AirportRecord>,
}

impl GpsTable {
    /// Keep records from `country` that lie inside `bounds`, then stable-sort
    /// by three-letter code.
    #[instrument(skip(records))]
    pub fn from_records<I>(records: I, country: &str, bounds: &BoundingBox) -> Self
    where
        I: IntoIterator<Item = AirportRecord>,
    {
        let mut records: Vec<AirportRecord> = records
            .into_iter()
            .filter(|r| r.country == country)
            .filter(|r| bounds.contains(r.latitude, r.longitude))
            .collect();
        records.sort_by(|a, b| a.code3.cmp(&b.code3));

        debug!(airports = records.len(), "loaded continental airport table");
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[AirportRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index the records whose code is in `wanted`, keeping the first record
    /// for each duplicated code.
    #[must_use]
    pub fn index_codes<'a>(&'a self, wanted: &HashSet<&str>) -> HashMap<&'a str, &'a AirportRecord> {
        let mut index = HashMap::with_capacity(wanted.len());
        for record in &self.records {
            if wanted.contains(record.code3.as_str()) {
                index.entry(record.code3.as_str()).or_insert(record);
            }
        }
        index
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
