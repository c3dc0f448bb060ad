//! Loaders for the two input tables.
//!
//! - [`passengers`]: origin/destination passenger counts keyed by
//!   `(origin, destination, year)`.
//! - [`airports`]: airport coordinates from the colon-delimited global
//!   airport database, filtered to the continental box.
//!
//! Both loaders accept already-typed rows (`from_rows` / `from_records`) and
//! also provide text parsers over any [`std::io::BufRead`] so callers can
//! feed files, stdin, or in-memory fixtures.

pub mod airports;
pub mod passengers;

pub use airports::{AirportRecord, GpsTable, parse_airport_line, parse_airport_table};
pub use passengers::{PassengerRow, RouteKey, RouteRecord, RouteRecords, parse_passenger_csv};
