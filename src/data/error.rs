use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors – fatal for the file being loaded
// ---------------------------------------------------------------------------

/// Why a record source could not be turned into a [`RecordStore`].
///
/// [`RecordStore`]: super::model::RecordStore
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// `row` counts data rows from 1; the header is not a data row.
    #[error("data row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("record source contains no launch records")]
    Empty,
}

impl LoadError {
    /// `index` is the 0-based position of the record in the source.
    pub(crate) fn invalid(index: usize, column: &str, reason: impl Into<String>) -> Self {
        LoadError::InvalidValue {
            row: index + 1,
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Query errors – recoverable, reported back to the caller
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("unknown launch site '{0}'")]
    UnknownSite(String),

    #[error("invalid payload range: low {low} is greater than high {high}")]
    InvalidRange { low: f64, high: f64 },
}
