//! Error types for loading and analysis.
//!
//! Missing coordinates and duplicate routes are data-shaping decisions, not
//! errors, so they have no variant here.

use std::fmt;

/// Iterative metric that can fail to converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    PageRank,
    Eigenvector,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageRank => f.write_str("PageRank"),
            Self::Eigenvector => f.write_str("eigenvector centrality"),
        }
    }
}

/// The year's network cannot be scored. No partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Fewer than two airports survived cleaning (includes years with no
    /// records at all).
    #[error("network has {node_count} airport(s); centrality needs at least 2")]
    TooFewAirports { node_count: usize },

    /// Power iteration ran out of iterations.
    #[error("{metric} did not converge within {max_iter} iterations")]
    NoConvergence { metric: Metric, max_iter: usize },
}

impl AnalysisError {
    /// Every analysis failure means the year's network is degenerate: too
    /// small to score, or one whose scores did not settle.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::TooFewAirports { .. } | Self::NoConvergence { .. }
        )
    }

    /// Short remediation hint for the rendering layer.
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        match self {
            Self::TooFewAirports { .. } => {
                "No route data with mapped airports for this year; pick another year."
            }
            Self::NoConvergence { .. } => {
                "Iteration did not converge within the iteration budget; raise max_iter in the config."
            }
        }
    }
}

/// Failure of the text parse step for passenger or airport tables.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The passenger table has no header row.
    #[error("input is empty; expected a header row")]
    MissingHeader,

    /// A required column is absent from the header.
    #[error("header is missing column {column}")]
    MissingColumn { column: &'static str },

    /// A row has fewer fields than the schema needs.
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A field could not be parsed into its typed value.
    #[error("line {line}: invalid {field} value {value:?}")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The underlying reader failed.
    #[error("read failed at line {line}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}
