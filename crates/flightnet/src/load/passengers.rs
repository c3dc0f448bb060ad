//! Multi-year passenger records.
//!
//! # Overview
//!
//! The raw table has one row per `(ORIGIN, DEST, YEAR)` with a passenger
//! count and a carrier name. [`RouteRecords`] keeps these rows in an owned
//! map keyed by [`RouteKey`], which collapses repeated keys: the last row
//! wins on the attributes while the key keeps the position of its first
//! appearance. Iteration follows that first-seen order, which is the order
//! later stages use to add nodes and edges.
//!
//! Rows touching an excluded code (seaplane bases, non-mainland fields) are
//! dropped before they reach the map.
//!
//! The record set is immutable after construction and is shared read-only
//! by every per-year extraction.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::BufRead;

use tracing::{debug, instrument};

use crate::error::LoadError;

/// One typed row of the passenger table.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRow {
    pub origin: String,
    pub dest: String,
    pub year: i32,
    pub passengers: f64,
    pub carrier: String,
}

impl PassengerRow {
    /// Convenience constructor used by fixtures and tests.
    #[must_use]
    pub fn new(origin: &str, dest: &str, year: i32, passengers: f64, carrier: &str) -> Self {
        Self {
            origin: origin.to_string(),
            dest: dest.to_string(),
            year,
            passengers,
            carrier: carrier.to_string(),
        }
    }
}

/// Composite key of the multi-year record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey {
    pub origin: String,
    pub dest: String,
    pub year: i32,
}

/// Attributes stored per key.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub passengers: f64,
    pub carrier: String,
}

/// Immutable multi-year route records.
#[derive(Debug, Clone, Default)]
pub struct RouteRecords {
    order: Vec<RouteKey>,
    records: HashMap<RouteKey, RouteRecord>,
    content_hash: String,
}

impl RouteRecords {
    /// Build the record set from typed rows, dropping rows whose origin or
    /// destination is listed in `excluded_codes`.
    #[instrument(skip(rows, excluded_codes))]
    pub fn from_rows<I>(rows: I, excluded_codes: &[String]) -> Self
    where
        I: IntoIterator<Item = PassengerRow>,
    {
        let excluded: HashSet<&str> = excluded_codes.iter().map(String::as_str).collect();

        let mut order = Vec::new();
        let mut records: HashMap<RouteKey, RouteRecord> = HashMap::new();
        let mut dropped = 0_usize;

        for row in rows {
            if excluded.contains(row.origin.as_str()) || excluded.contains(row.dest.as_str()) {
                dropped += 1;
                continue;
            }

            let key = RouteKey {
                origin: row.origin,
                dest: row.dest,
                year: row.year,
            };
            let record = RouteRecord {
                passengers: row.passengers,
                carrier: row.carrier,
            };

            if !records.contains_key(&key) {
                order.push(key.clone());
            }
            records.insert(key, record);
        }

        let content_hash = compute_record_hash(&order, &records);
        debug!(
            records = order.len(),
            excluded = dropped,
            %content_hash,
            "loaded passenger records"
        );

        Self {
            order,
            records,
            content_hash,
        }
    }

    /// Number of distinct `(origin, destination, year)` keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate records in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteKey, &RouteRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.records.get(key).map(|record| (key, record)))
    }

    /// Look up one record.
    #[must_use]
    pub fn get(&self, origin: &str, dest: &str, year: i32) -> Option<&RouteRecord> {
        self.records.get(&RouteKey {
            origin: origin.to_string(),
            dest: dest.to_string(),
            year,
        })
    }

    /// Distinct years present in the data, ascending.
    #[must_use]
    pub fn years(&self) -> BTreeSet<i32> {
        self.order.iter().map(|key| key.year).collect()
    }

    /// BLAKE3 fingerprint of the record set (`blake3:<hex>`).
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

fn compute_record_hash(order: &[RouteKey], records: &HashMap<RouteKey, RouteRecord>) -> String {
    let mut hasher = blake3::Hasher::new();
    for key in order {
        let Some(record) = records.get(key) else {
            continue;
        };
        hasher.update(key.origin.as_bytes());
        hasher.update(b"\x00");
        hasher.update(key.dest.as_bytes());
        hasher.update(b"\x00");
        hasher.update(&key.year.to_le_bytes());
        hasher.update(&record.passengers.to_bits().to_le_bytes());
        hasher.update(record.carrier.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

const COL_ORIGIN: &str = "ORIGIN";
const COL_DEST: &str = "DEST";
const COL_YEAR: &str = "YEAR";
const COL_PASSENGERS: &str = "PASSENGERS";
const COL_CARRIER: &str = "UNIQUE_CARRIER_NAME";

/// Column positions resolved from the header row.
struct Columns {
    origin: usize,
    dest: usize,
    year: usize,
    passengers: usize,
    carrier: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, LoadError> {
        let find = |column: &'static str| {
            header
                .iter()
                .position(|name| name.trim() == column)
                .ok_or(LoadError::MissingColumn { column })
        };

        Ok(Self {
            origin: find(COL_ORIGIN)?,
            dest: find(COL_DEST)?,
            year: find(COL_YEAR)?,
            passengers: find(COL_PASSENGERS)?,
            carrier: find(COL_CARRIER)?,
        })
    }

    fn max_index(&self) -> usize {
        self.origin
            .max(self.dest)
            .max(self.year)
            .max(self.passengers)
            .max(self.carrier)
    }
}

/// Parse a comma-separated passenger table with a header row.
///
/// Columns are located by name, so extra columns and any column order are
/// accepted. Fields may be double-quoted (with `""` as an escaped quote);
/// quoted fields may not span lines. Blank lines are skipped.
///
/// # Errors
///
/// Returns a [`LoadError`] for a missing header or column, a short row, a
/// non-integer `YEAR`, a non-finite or negative `PASSENGERS`, or a read
/// failure.
pub fn parse_passenger_csv<R: BufRead>(reader: R) -> Result<Vec<PassengerRow>, LoadError> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            None => return Err(LoadError::MissingHeader),
            Some((idx, line)) => {
                let line = line.map_err(|source| LoadError::Io {
                    line: idx + 1,
                    source,
                })?;
                let line = line.trim_end_matches('\r');
                if !line.trim().is_empty() {
                    break split_csv_record(line);
                }
            }
        }
    };
    let columns = Columns::from_header(&header)?;
    let needed = columns.max_index() + 1;

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::Io {
            line: line_no,
            source,
        })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_csv_record(line);
        if fields.len() < needed {
            return Err(LoadError::FieldCount {
                line: line_no,
                expected: needed,
                found: fields.len(),
            });
        }

        let year_raw = fields[columns.year].trim();
        let year = year_raw
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidValue {
                line: line_no,
                field: COL_YEAR,
                value: year_raw.to_string(),
            })?;

        let passengers_raw = fields[columns.passengers].trim();
        let passengers = passengers_raw
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| LoadError::InvalidValue {
                line: line_no,
                field: COL_PASSENGERS,
                value: passengers_raw.to_string(),
            })?;

        rows.push(PassengerRow {
            origin: fields[columns.origin].trim().to_string(),
            dest: fields[columns.dest].trim().to_string(),
            year,
            passengers,
            carrier: fields[columns.carrier].clone(),
        });
    }

    Ok(rows)
}

/// Split one CSV line into fields, honouring double quotes.
fn split_csv_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    fn excluded() -> Vec<String> {
        NetworkConfig::default().excluded_codes
    }

    #[test]
    fn excluded_codes_drop_rows_on_either_side() {
        let rows = vec![
            PassengerRow::new("JFK", "LAX", 2015, 100.0, "Delta"),
            PassengerRow::new("SPB", "LAX", 2015, 10.0, "Kenmore"),
            PassengerRow::new("JFK", "PCA", 2015, 10.0, "Kenmore"),
            PassengerRow::new("AIK", "SSB", 2015, 10.0, "Kenmore"),
        ];
        let records = RouteRecords::from_rows(rows, &excluded());

        assert_eq!(records.len(), 1);
        assert!(records.get("JFK", "LAX", 2015).is_some());
        assert!(records.get("SPB", "LAX", 2015).is_none());
    }

    #[test]
    fn repeated_key_last_write_wins_first_position_kept() {
        let rows = vec![
            PassengerRow::new("JFK", "LAX", 2015, 100.0, "Delta"),
            PassengerRow::new("ORD", "ATL", 2015, 50.0, "United"),
            PassengerRow::new("JFK", "LAX", 2015, 300.0, "American"),
        ];
        let records = RouteRecords::from_rows(rows, &excluded());

        assert_eq!(records.len(), 2);
        let record = records.get("JFK", "LAX", 2015).expect("JFK-LAX present");
        assert!((record.passengers - 300.0).abs() < f64::EPSILON);
        assert_eq!(record.carrier, "American");

        let keys: Vec<_> = records.iter().map(|(k, _)| k.origin.as_str()).collect();
        assert_eq!(keys, ["JFK", "ORD"]);
    }

    #[test]
    fn same_pair_different_years_are_distinct_keys() {
        let rows = vec![
            PassengerRow::new("JFK", "LAX", 2014, 100.0, "Delta"),
            PassengerRow::new("JFK", "LAX", 2015, 200.0, "Delta"),
        ];
        let records = RouteRecords::from_rows(rows, &excluded());
        assert_eq!(records.len(), 2);
        assert_eq!(records.years().into_iter().collect::<Vec<_>>(), [2014, 2015]);
    }

    #[test]
    fn content_hash_tracks_data() {
        let a = RouteRecords::from_rows(
            vec![PassengerRow::new("JFK", "LAX", 2015, 100.0, "Delta")],
            &excluded(),
        );
        let b = RouteRecords::from_rows(
            vec![PassengerRow::new("JFK", "LAX", 2015, 101.0, "Delta")],
            &excluded(),
        );
        let a_again = RouteRecords::from_rows(
            vec![PassengerRow::new("JFK", "LAX", 2015, 100.0, "Delta")],
            &excluded(),
        );

        assert!(a.content_hash().starts_with("blake3:"));
        assert_ne!(a.content_hash(), b.content_hash());
        assert_eq!(a.content_hash(), a_again.content_hash());
    }

    #[test]
    fn csv_columns_located_by_header() {
        let input = "\
PASSENGERS,UNIQUE_CARRIER_NAME,ORIGIN,DEST,DISTANCE,YEAR
1200.0,\"Delta Air Lines Inc.\",ATL,JFK,760,2015
0,\"Smith, Jones \"\"Air\"\" LLC\",BOS,PVD,40,2014
";
        let rows = parse_passenger_csv(input.as_bytes()).expect("parse csv");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], PassengerRow::new("ATL", "JFK", 2015, 1200.0, "Delta Air Lines Inc."));
        assert_eq!(rows[1].carrier, "Smith, Jones \"Air\" LLC");
        assert!(rows[1].passengers.abs() < f64::EPSILON);
    }

    #[test]
    fn csv_handles_crlf_and_blank_lines() {
        let input = "ORIGIN,DEST,YEAR,PASSENGERS,UNIQUE_CARRIER_NAME\r\n\r\nATL,JFK,2015,5,Delta\r\n";
        let rows = parse_passenger_csv(input.as_bytes()).expect("parse csv");
        assert_eq!(rows, vec![PassengerRow::new("ATL", "JFK", 2015, 5.0, "Delta")]);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let input = "ORIGIN,DEST,YEAR,UNIQUE_CARRIER_NAME\nATL,JFK,2015,Delta\n";
        let err = parse_passenger_csv(input.as_bytes()).expect_err("missing PASSENGERS");
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "PASSENGERS"
            }
        ));
    }

    #[test]
    fn csv_rejects_bad_numbers_with_line_numbers() {
        let input = "ORIGIN,DEST,YEAR,PASSENGERS,UNIQUE_CARRIER_NAME\nATL,JFK,2015,5,Delta\nATL,BOS,year,5,Delta\n";
        let err = parse_passenger_csv(input.as_bytes()).expect_err("bad year");
        assert!(matches!(
            err,
            LoadError::InvalidValue {
                line: 3,
                field: "YEAR",
                ..
            }
        ));

        let input = "ORIGIN,DEST,YEAR,PASSENGERS,UNIQUE_CARRIER_NAME\nATL,JFK,2015,-4,Delta\n";
        let err = parse_passenger_csv(input.as_bytes()).expect_err("negative passengers");
        assert!(matches!(
            err,
            LoadError::InvalidValue {
                line: 2,
                field: "PASSENGERS",
                ..
            }
        ));
    }

    #[test]
    fn csv_short_row_is_reported() {
        let input = "ORIGIN,DEST,YEAR,PASSENGERS,UNIQUE_CARRIER_NAME\nATL,JFK,2015\n";
        let err = parse_passenger_csv(input.as_bytes()).expect_err("short row");
        assert!(matches!(
            err,
            LoadError::FieldCount {
                line: 2,
                expected: 5,
                found: 3
            }
        ));
    }

    #[test]
    fn csv_empty_input_has_no_header() {
        let err = parse_passenger_csv("".as_bytes()).expect_err("empty input");
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn split_keeps_empty_fields() {
        assert_eq!(split_csv_record("a,,c,"), ["a", "", "c", ""]);
        assert_eq!(split_csv_record("\"x,y\",z"), ["x,y", "z"]);
    }
}
